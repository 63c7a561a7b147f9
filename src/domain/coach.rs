use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::coach_email::CoachEmail;
use crate::domain::coach_status::CoachStatus;
use crate::domain::email_type::EmailType;

pub const TRIAL_DURATION_DAYS: i64 = 14;

/// A registered coach with their trial window and email sequence state.
///
/// The sequence fields (`last_email_type_sent`, `last_email_sent_at`,
/// `email_sequence_started`) are the only ones the sequence core mutates.
#[derive(Debug, serde::Serialize)]
pub struct Coach {
    pub id: Uuid,
    pub email: CoachEmail,
    pub first_name: String,
    pub last_name: String,
    pub trial_start: DateTime<Utc>,
    pub trial_end: DateTime<Utc>,
    pub status: CoachStatus,
    pub last_email_type_sent: Option<EmailType>,
    pub last_email_sent_at: Option<DateTime<Utc>>,
    pub email_sequence_started: bool,
}

impl Coach {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

pub fn trial_end_from_start(trial_start: DateTime<Utc>) -> DateTime<Utc> {
    trial_start + Duration::days(TRIAL_DURATION_DAYS)
}
