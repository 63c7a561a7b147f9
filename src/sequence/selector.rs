use chrono::{DateTime, Utc};

use crate::domain::coach::Coach;
use crate::domain::email_type::EmailType;

/// Picks the email a coach should receive next, or `None` when they are
/// caught up.
///
/// Returns the latest schedule entry whose day offset has been reached and
/// which comes strictly after the last sent type. When a coach is several
/// emails behind (the batch job skipped some days), only the single
/// most-overdue type is returned - one send per invocation, no backfill
/// burst.
pub fn next_due(coach: &Coach, now: DateTime<Utc>) -> Option<EmailType> {
    if now < coach.trial_start {
        return None;
    }

    let elapsed_days = (now - coach.trial_start).num_days();
    let last_sent_index = coach
        .last_email_type_sent
        .map(|email_type| email_type.schedule_index());

    EmailType::SCHEDULE
        .iter()
        .copied()
        .filter(|email_type| email_type.day_offset() <= elapsed_days)
        .filter(|email_type| match last_sent_index {
            Some(index) => email_type.schedule_index() > index,
            None => true,
        })
        .last()
}
