use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::coach::Coach;
use crate::domain::coach_email::CoachEmail;
use crate::domain::coach_status::CoachStatus;
use crate::domain::email_type::EmailType;
use crate::domain::variant::Variant;
use crate::email_client::EmailClient;
use crate::sequence::dispatch_log::{self, Claim, InsertOutcome};
use crate::sequence::selector::next_due;
use crate::templates::{self, TemplateData};

/// Pause between outbound sends. A policy knob for provider rate limits, not
/// a correctness requirement.
const INTER_SEND_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum SendOutcome {
    Sent {
        subject: String,
        provider_message_id: String,
    },
    /// The dispatch log already holds a sent-entry for this (coach, email
    /// type) pair. A normal idempotence outcome, not a failure.
    Skipped,
}

#[derive(thiserror::Error, Debug)]
pub enum SequenceEmailError {
    #[error("failed to send the email via the provider")]
    Send(#[source] reqwest::Error),
    #[error("database error")]
    Store(#[source] sqlx::Error),
}

#[derive(serde::Serialize)]
pub struct SequenceItemResult {
    pub coach_id: Uuid,
    pub email: String,
    pub email_type: EmailType,
    pub success: bool,
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(serde::Serialize)]
pub struct BatchSummary {
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub results: Vec<SequenceItemResult>,
}

/// Sends the next due email to every eligible coach, one at a time.
///
/// One coach's failure never aborts the run; the summary always covers every
/// due item.
#[tracing::instrument(
    name = "Run the email sequence batch",
    skip(db_pool, email_client, dashboard_url, support_email)
)]
pub async fn run_batch(
    db_pool: &PgPool,
    email_client: &EmailClient,
    dashboard_url: &str,
    support_email: &str,
    now: DateTime<Utc>,
) -> Result<BatchSummary, sqlx::Error> {
    let coaches = get_sequence_candidates(db_pool).await?;
    let due: Vec<(Coach, EmailType)> = coaches
        .into_iter()
        .filter_map(|coach| next_due(&coach, now).map(|email_type| (coach, email_type)))
        .collect();

    tracing::info!("Processing {} coaches with a due email", due.len());

    let mut summary = BatchSummary {
        processed: due.len(),
        successful: 0,
        failed: 0,
        skipped: 0,
        results: Vec::with_capacity(due.len()),
    };

    for (position, (coach, email_type)) in due.into_iter().enumerate() {
        if position > 0 {
            tokio::time::sleep(INTER_SEND_DELAY).await;
        }

        let variant = Variant::pick_random();
        let outcome = send_sequence_email(
            db_pool,
            email_client,
            &coach,
            email_type,
            variant,
            dashboard_url,
            support_email,
            now,
        )
        .await;

        let result = match outcome {
            Ok(SendOutcome::Sent { .. }) => {
                summary.successful += 1;
                SequenceItemResult {
                    coach_id: coach.id,
                    email: coach.email.as_ref().to_string(),
                    email_type,
                    success: true,
                    skipped: false,
                    error: None,
                }
            }
            Ok(SendOutcome::Skipped) => {
                summary.skipped += 1;
                SequenceItemResult {
                    coach_id: coach.id,
                    email: coach.email.as_ref().to_string(),
                    email_type,
                    success: true,
                    skipped: true,
                    error: None,
                }
            }
            Err(err) => {
                tracing::error!("Failed to process coach {}: {:?}", coach.id, err);
                summary.failed += 1;
                SequenceItemResult {
                    coach_id: coach.id,
                    email: coach.email.as_ref().to_string(),
                    email_type,
                    success: false,
                    skipped: false,
                    error: Some(err.to_string()),
                }
            }
        };

        summary.results.push(result);
    }

    Ok(summary)
}

/// Claim, render, send and log one sequence email, then advance the coach's
/// sequence state. Used by the batch run and by the welcome send at
/// registration.
#[tracing::instrument(
    name = "Send a sequence email",
    skip(db_pool, email_client, coach, dashboard_url, support_email),
    fields(
        coach_id = %coach.id,
        coach_email = %coach.email.as_ref(),
        email_type = %email_type.as_ref(),
        variant = %variant.as_ref()
    )
)]
pub async fn send_sequence_email(
    db_pool: &PgPool,
    email_client: &EmailClient,
    coach: &Coach,
    email_type: EmailType,
    variant: Variant,
    dashboard_url: &str,
    support_email: &str,
    now: DateTime<Utc>,
) -> Result<SendOutcome, SequenceEmailError> {
    dispatch_email(
        db_pool,
        email_client,
        coach,
        email_type,
        variant,
        dashboard_url,
        support_email,
        now,
        true,
    )
    .await
}

/// Operator override: sends outside the schedule, still guarded by the
/// dispatch log, but leaves the coach's sequence state untouched.
#[tracing::instrument(
    name = "Send a manual email",
    skip(db_pool, email_client, coach, dashboard_url, support_email),
    fields(
        coach_id = %coach.id,
        email_type = %email_type.as_ref(),
        variant = %variant.as_ref()
    )
)]
pub async fn send_manual_email(
    db_pool: &PgPool,
    email_client: &EmailClient,
    coach: &Coach,
    email_type: EmailType,
    variant: Variant,
    dashboard_url: &str,
    support_email: &str,
    now: DateTime<Utc>,
) -> Result<SendOutcome, SequenceEmailError> {
    dispatch_email(
        db_pool,
        email_client,
        coach,
        email_type,
        variant,
        dashboard_url,
        support_email,
        now,
        false,
    )
    .await
}

#[allow(clippy::too_many_arguments)]
async fn dispatch_email(
    db_pool: &PgPool,
    email_client: &EmailClient,
    coach: &Coach,
    email_type: EmailType,
    variant: Variant,
    dashboard_url: &str,
    support_email: &str,
    now: DateTime<Utc>,
    advance_state: bool,
) -> Result<SendOutcome, SequenceEmailError> {
    let claim = dispatch_log::try_claim(db_pool, coach.id, email_type)
        .await
        .map_err(SequenceEmailError::Store)?;

    if let Claim::AlreadySent = claim {
        tracing::info!(
            "Email {} was already sent to coach {}, skipping",
            email_type.as_ref(),
            coach.id
        );
        return Ok(SendOutcome::Skipped);
    }

    let data = TemplateData::for_coach(coach, dashboard_url, support_email, now);
    let rendered = templates::render(email_type, &data, variant);

    let provider_message_id = match email_client
        .send_email(&coach.email, &rendered.subject, &rendered.html, &rendered.text)
        .await
    {
        Ok(provider_message_id) => provider_message_id,
        Err(err) => {
            // Coach state stays untouched, so the same email is retried on
            // the next run.
            if let Err(log_err) = dispatch_log::record_failed(
                db_pool,
                coach.id,
                email_type,
                &rendered.subject,
                &rendered.html,
                now,
            )
            .await
            {
                tracing::error!("Failed to record the failed send: {:?}", log_err);
            }

            return Err(SequenceEmailError::Send(err));
        }
    };

    match dispatch_log::record_sent(
        db_pool,
        coach.id,
        email_type,
        &rendered.subject,
        &rendered.html,
        &provider_message_id,
        now,
    )
    .await
    {
        Ok(InsertOutcome::Recorded) => {}
        Ok(InsertOutcome::AlreadySent) => {
            tracing::warn!(
                "Another run already claimed {} for coach {}",
                email_type.as_ref(),
                coach.id
            );
            return Ok(SendOutcome::Skipped);
        }
        Err(err) => {
            // The email went out, so a log-write failure must not fail the
            // operation.
            tracing::error!("Failed to record the sent email: {:?}", err);
        }
    }

    if advance_state {
        if let Err(err) = advance_sequence_state(db_pool, coach.id, email_type, now).await {
            tracing::error!("Failed to advance the coach's sequence state: {:?}", err);
        }
    }

    Ok(SendOutcome::Sent {
        subject: rendered.subject,
        provider_message_id,
    })
}

#[tracing::instrument(name = "Advance the coach's sequence state", skip(db_pool))]
async fn advance_sequence_state(
    db_pool: &PgPool,
    coach_id: Uuid,
    email_type: EmailType,
    sent_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE coaches
        SET last_email_type_sent = $1, last_email_sent_at = $2, email_sequence_started = TRUE
        WHERE id = $3
        "#,
    )
    .bind(email_type.as_ref())
    .bind(sent_at)
    .bind(coach_id)
    .execute(db_pool)
    .await?;

    Ok(())
}

#[tracing::instrument(name = "Fetch coaches eligible for the email sequence", skip(db_pool))]
async fn get_sequence_candidates(db_pool: &PgPool) -> Result<Vec<Coach>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT id, email, first_name, last_name, trial_start, trial_end, status,
               last_email_type_sent, last_email_sent_at, email_sequence_started
        FROM coaches
        WHERE status IN ('trial_active', 'trial_expired')
        "#,
    )
    .map(map_coach_row)
    .fetch_all(db_pool)
    .await
}

pub fn map_coach_row(row: PgRow) -> Coach {
    Coach {
        id: row.get("id"),
        email: CoachEmail::parse(row.get("email")).unwrap(),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        trial_start: row.get("trial_start"),
        trial_end: row.get("trial_end"),
        status: CoachStatus::parse(row.get("status")).unwrap(),
        last_email_type_sent: row
            .get::<Option<String>, _>("last_email_type_sent")
            .map(|email_type| EmailType::parse(email_type).unwrap()),
        last_email_sent_at: row.get("last_email_sent_at"),
        email_sequence_started: row.get("email_sequence_started"),
    }
}
