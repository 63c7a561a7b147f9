//! At-most-once guard over the `email_sequence_log` table.
//!
//! The fast-path check in [`try_claim`] and the conditional insert in
//! [`record_sent`] together form the claim: the insert runs against a
//! partial unique index on (coach_id, email_type) WHERE status = 'sent', so
//! the guarantee holds even if batch runs ever overlap.

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::email_type::EmailType;

#[derive(Debug, PartialEq, Eq)]
pub enum Claim {
    Granted,
    AlreadySent,
}

#[derive(Debug, PartialEq, Eq)]
pub enum InsertOutcome {
    Recorded,
    AlreadySent,
}

#[tracing::instrument(name = "Check the dispatch log for an earlier send", skip(db_pool))]
pub async fn try_claim(
    db_pool: &PgPool,
    coach_id: Uuid,
    email_type: EmailType,
) -> Result<Claim, sqlx::Error> {
    let already_sent = sqlx::query(
        r#"
        SELECT EXISTS(
            SELECT 1
            FROM email_sequence_log
            WHERE coach_id = $1 AND email_type = $2 AND status = 'sent'
        ) AS already_sent
        "#,
    )
    .bind(coach_id)
    .bind(email_type.as_ref())
    .map(|row: PgRow| row.get::<bool, _>("already_sent"))
    .fetch_one(db_pool)
    .await?;

    if already_sent {
        Ok(Claim::AlreadySent)
    } else {
        Ok(Claim::Granted)
    }
}

/// Appends the sent-entry. Zero rows affected means a concurrent run won the
/// claim first.
#[tracing::instrument(
    name = "Record a sent email in the dispatch log",
    skip(db_pool, subject_line, email_html)
)]
pub async fn record_sent(
    db_pool: &PgPool,
    coach_id: Uuid,
    email_type: EmailType,
    subject_line: &str,
    email_html: &str,
    provider_message_id: &str,
    sent_at: DateTime<Utc>,
) -> Result<InsertOutcome, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO email_sequence_log
            (id, coach_id, email_type, subject_line, email_html, status, provider_message_id, sent_at)
        VALUES ($1, $2, $3, $4, $5, 'sent', $6, $7)
        ON CONFLICT (coach_id, email_type) WHERE status = 'sent' DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(coach_id)
    .bind(email_type.as_ref())
    .bind(subject_line)
    .bind(email_html)
    .bind(provider_message_id)
    .bind(sent_at)
    .execute(db_pool)
    .await?;

    if result.rows_affected() == 0 {
        Ok(InsertOutcome::AlreadySent)
    } else {
        Ok(InsertOutcome::Recorded)
    }
}

/// Appends a failed-entry. Failed attempts may repeat, only 'sent' rows are
/// unique per (coach, email type).
#[tracing::instrument(
    name = "Record a failed send in the dispatch log",
    skip(db_pool, subject_line, email_html)
)]
pub async fn record_failed(
    db_pool: &PgPool,
    coach_id: Uuid,
    email_type: EmailType,
    subject_line: &str,
    email_html: &str,
    sent_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO email_sequence_log
            (id, coach_id, email_type, subject_line, email_html, status, provider_message_id, sent_at)
        VALUES ($1, $2, $3, $4, $5, 'failed', NULL, $6)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(coach_id)
    .bind(email_type.as_ref())
    .bind(subject_line)
    .bind(email_html)
    .bind(sent_at)
    .execute(db_pool)
    .await?;

    Ok(())
}
