use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::coach::{trial_end_from_start, Coach, TRIAL_DURATION_DAYS};
use crate::domain::coach_status::CoachStatus;
use crate::domain::email_type::EmailType;
use crate::domain::new_coach::{NewCoach, RegisterBody};
use crate::domain::variant::Variant;
use crate::email_client::EmailClient;
use crate::sequence::processor::{map_coach_row, send_sequence_email, SendOutcome};
use crate::startup::{DashboardUrl, SupportEmail};

#[derive(serde::Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub trial_start: DateTime<Utc>,
    pub trial_end: DateTime<Utc>,
    pub trial_days_remaining: i64,
    pub status: CoachStatus,
    pub database_saved: bool,
    pub email_sent: bool,
}

#[derive(thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    Validation(String),
    #[error("email is already registered")]
    DuplicateEmail,
    #[error("failed to store the new coach")]
    Store(#[source] sqlx::Error),
}

impl std::fmt::Debug for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}

impl ResponseError for RegisterError {
    fn status_code(&self) -> StatusCode {
        match self {
            RegisterError::Validation(_) => StatusCode::BAD_REQUEST,
            RegisterError::DuplicateEmail => StatusCode::CONFLICT,
            RegisterError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[tracing::instrument(
    name = "Registering a new coach",
    skip(body, db_pool, email_client, dashboard_url, support_email),
    fields(
        coach_email = %body.email,
        coach_name = %body.name
    )
)]
pub async fn handle_register(
    body: web::Json<RegisterBody>,
    db_pool: web::Data<PgPool>,
    email_client: web::Data<EmailClient>,
    dashboard_url: web::Data<DashboardUrl>,
    support_email: web::Data<SupportEmail>,
) -> Result<HttpResponse, RegisterError> {
    let new_coach: NewCoach = body.try_into().map_err(RegisterError::Validation)?;
    let now = Utc::now();

    let coach = insert_coach(&new_coach, db_pool.get_ref(), now)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                RegisterError::DuplicateEmail
            } else {
                RegisterError::Store(err)
            }
        })?;

    // The welcome email goes through the same claim -> render -> send -> log
    // pipeline as the batch. Registration is already durable at this point, a
    // send failure must not roll it back.
    let email_sent = match send_sequence_email(
        db_pool.get_ref(),
        email_client.get_ref(),
        &coach,
        EmailType::Welcome,
        Variant::default(),
        &dashboard_url.0,
        &support_email.0,
        now,
    )
    .await
    {
        Ok(SendOutcome::Sent { .. }) => true,
        Ok(SendOutcome::Skipped) => false,
        Err(err) => {
            tracing::error!(
                "Failed to send the welcome email to {}: {:?}",
                coach.email.as_ref(),
                err
            );
            false
        }
    };

    Ok(HttpResponse::Created().json(RegisterResponse {
        id: coach.id,
        name: coach.full_name(),
        email: coach.email.as_ref().to_string(),
        trial_start: coach.trial_start,
        trial_end: coach.trial_end,
        trial_days_remaining: TRIAL_DURATION_DAYS,
        status: coach.status,
        database_saved: true,
        email_sent,
    }))
}

#[tracing::instrument(name = "Insert a new coach into the database", skip(new_coach, db_pool))]
async fn insert_coach(
    new_coach: &NewCoach,
    db_pool: &PgPool,
    now: DateTime<Utc>,
) -> Result<Coach, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO coaches
            (id, email, first_name, last_name, phone, company, coaching_experience, bio,
             trial_start, trial_end, status, email_sequence_started)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, FALSE)
        RETURNING id, email, first_name, last_name, trial_start, trial_end, status,
                  last_email_type_sent, last_email_sent_at, email_sequence_started
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new_coach.email.as_ref())
    .bind(new_coach.name.first_name())
    .bind(new_coach.name.last_name())
    .bind(new_coach.phone.as_deref())
    .bind(new_coach.company.as_deref())
    .bind(new_coach.coaching_experience.as_deref())
    .bind(new_coach.bio.as_deref())
    .bind(now)
    .bind(trial_end_from_start(now))
    .bind(CoachStatus::TrialActive.as_ref())
    .map(map_coach_row)
    .fetch_one(db_pool)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        err
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}
