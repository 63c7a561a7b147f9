use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::coach::Coach;
use crate::domain::email_type::EmailType;
use crate::domain::variant::Variant;
use crate::email_client::EmailClient;
use crate::sequence::processor::{
    map_coach_row, run_batch, send_manual_email, SendOutcome, SequenceEmailError,
};
use crate::startup::{DashboardUrl, SupportEmail};
use crate::templates::{self, TemplateData};

#[derive(serde::Deserialize, Debug)]
pub struct ManualSendBody {
    pub coach_id: Uuid,
    pub email_type: String,
    pub variant: Option<String>,
}

#[derive(serde::Serialize)]
pub struct ManualSendResponse {
    pub success: bool,
    pub skipped: bool,
    pub coach_id: Uuid,
    pub email_type: EmailType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_message_id: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
pub struct PreviewParameters {
    pub coach_id: Uuid,
    pub email_type: String,
    pub variant: Option<String>,
    pub format: Option<String>,
}

#[derive(serde::Serialize)]
pub struct PreviewResponse {
    pub coach_id: Uuid,
    pub email_type: EmailType,
    pub variant: Variant,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub days_remaining: i64,
}

#[derive(thiserror::Error)]
pub enum SequenceError {
    #[error("coach not found")]
    CoachNotFound,
    #[error("{0}")]
    UnknownTemplate(String),
    #[error("{0}")]
    InvalidVariant(String),
    #[error("failed to send the email via the provider")]
    SendEmail(#[source] reqwest::Error),
    #[error("database error")]
    Store(#[source] sqlx::Error),
}

impl std::fmt::Debug for SequenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Caused by:\n\t({})", self)
    }
}

impl ResponseError for SequenceError {
    fn status_code(&self) -> StatusCode {
        match self {
            SequenceError::CoachNotFound => StatusCode::NOT_FOUND,
            SequenceError::UnknownTemplate(_) => StatusCode::BAD_REQUEST,
            SequenceError::InvalidVariant(_) => StatusCode::BAD_REQUEST,
            SequenceError::SendEmail(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SequenceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SequenceEmailError> for SequenceError {
    fn from(err: SequenceEmailError) -> Self {
        match err {
            SequenceEmailError::Send(send_err) => SequenceError::SendEmail(send_err),
            SequenceEmailError::Store(store_err) => SequenceError::Store(store_err),
        }
    }
}

/// Batch trigger, invoked by an external timer (or manually). Per-item
/// failures are reported in the summary, never as a request failure.
#[tracing::instrument(
    name = "Trigger the email sequence batch",
    skip(db_pool, email_client, dashboard_url, support_email)
)]
pub async fn handle_send_sequence(
    db_pool: web::Data<PgPool>,
    email_client: web::Data<EmailClient>,
    dashboard_url: web::Data<DashboardUrl>,
    support_email: web::Data<SupportEmail>,
) -> Result<HttpResponse, SequenceError> {
    let summary = run_batch(
        db_pool.get_ref(),
        email_client.get_ref(),
        &dashboard_url.0,
        &support_email.0,
        Utc::now(),
    )
    .await
    .map_err(SequenceError::Store)?;

    Ok(HttpResponse::Ok().json(summary))
}

#[tracing::instrument(
    name = "Manually send a sequence email",
    skip(body, db_pool, email_client, dashboard_url, support_email),
    fields(
        coach_id = %body.coach_id,
        email_type = %body.email_type
    )
)]
pub async fn handle_manual_send(
    body: web::Json<ManualSendBody>,
    db_pool: web::Data<PgPool>,
    email_client: web::Data<EmailClient>,
    dashboard_url: web::Data<DashboardUrl>,
    support_email: web::Data<SupportEmail>,
) -> Result<HttpResponse, SequenceError> {
    let email_type =
        EmailType::parse(body.email_type.clone()).map_err(SequenceError::UnknownTemplate)?;
    let variant = parse_variant(&body.variant)?;

    let coach = get_coach_by_id(db_pool.get_ref(), body.coach_id)
        .await
        .map_err(SequenceError::Store)?
        .ok_or(SequenceError::CoachNotFound)?;

    let outcome = send_manual_email(
        db_pool.get_ref(),
        email_client.get_ref(),
        &coach,
        email_type,
        variant,
        &dashboard_url.0,
        &support_email.0,
        Utc::now(),
    )
    .await?;

    let response = match outcome {
        SendOutcome::Sent {
            subject,
            provider_message_id,
        } => ManualSendResponse {
            success: true,
            skipped: false,
            coach_id: coach.id,
            email_type,
            subject: Some(subject),
            provider_message_id: Some(provider_message_id),
        },
        SendOutcome::Skipped => ManualSendResponse {
            success: false,
            skipped: true,
            coach_id: coach.id,
            email_type,
            subject: None,
            provider_message_id: None,
        },
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Renders a template for inspection. Read-only: nothing is sent, nothing is
/// logged.
#[tracing::instrument(
    name = "Preview a sequence email",
    skip(parameters, db_pool, dashboard_url, support_email),
    fields(
        coach_id = %parameters.coach_id,
        email_type = %parameters.email_type
    )
)]
pub async fn handle_preview(
    parameters: web::Query<PreviewParameters>,
    db_pool: web::Data<PgPool>,
    dashboard_url: web::Data<DashboardUrl>,
    support_email: web::Data<SupportEmail>,
) -> Result<HttpResponse, SequenceError> {
    let email_type =
        EmailType::parse(parameters.email_type.clone()).map_err(SequenceError::UnknownTemplate)?;
    let variant = parse_variant(&parameters.variant)?;

    let coach = get_coach_by_id(db_pool.get_ref(), parameters.coach_id)
        .await
        .map_err(SequenceError::Store)?
        .ok_or(SequenceError::CoachNotFound)?;

    let data = TemplateData::for_coach(&coach, &dashboard_url.0, &support_email.0, Utc::now());
    let rendered = templates::render(email_type, &data, variant);

    match parameters.format.as_deref() {
        Some("html") => Ok(HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(rendered.html)),
        _ => Ok(HttpResponse::Ok().json(PreviewResponse {
            coach_id: coach.id,
            email_type,
            variant,
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
            days_remaining: data.days_remaining,
        })),
    }
}

fn parse_variant(variant: &Option<String>) -> Result<Variant, SequenceError> {
    match variant {
        Some(variant) => {
            Variant::parse(variant.clone()).map_err(SequenceError::InvalidVariant)
        }
        None => Ok(Variant::default()),
    }
}

#[tracing::instrument(name = "Fetch a coach by id", skip(db_pool))]
async fn get_coach_by_id(db_pool: &PgPool, coach_id: Uuid) -> Result<Option<Coach>, sqlx::Error> {
    sqlx::query(
        r#"
        SELECT id, email, first_name, last_name, trial_start, trial_end, status,
               last_email_type_sent, last_email_sent_at, email_sequence_started
        FROM coaches
        WHERE id = $1
        "#,
    )
    .bind(coach_id)
    .map(map_coach_row)
    .fetch_optional(db_pool)
    .await
}
