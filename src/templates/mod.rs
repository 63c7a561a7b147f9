//! Rendering of the trial email sequence.
//!
//! Rendering is pure: the caller supplies everything time-dependent through
//! [`TemplateData`], so the same input always produces the same output. Every
//! template ships an HTML body and a plain-text body carrying the same key
//! facts (trial end date, dashboard link).

mod content;
mod layout;

use chrono::{DateTime, Utc};

use crate::domain::coach::Coach;
use crate::domain::email_type::EmailType;
use crate::domain::variant::Variant;

/// Interpolation fields shared by all templates.
#[derive(Debug, Clone)]
pub struct TemplateData {
    pub first_name: String,
    pub login_url: String,
    pub support_email: String,
    pub trial_end_date: String,
    pub days_remaining: i64,
}

impl TemplateData {
    pub fn for_coach(
        coach: &Coach,
        dashboard_url: &str,
        support_email: &str,
        now: DateTime<Utc>,
    ) -> TemplateData {
        let first_name = if coach.first_name.trim().is_empty() {
            String::from("Coach")
        } else {
            coach.first_name.clone()
        };

        TemplateData {
            first_name,
            login_url: dashboard_url.to_string(),
            support_email: support_email.to_string(),
            trial_end_date: coach.trial_end.format("%d.%m.%Y").to_string(),
            days_remaining: (coach.trial_end - now).num_days().max(0),
        }
    }
}

#[derive(Debug)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

pub fn render(email_type: EmailType, data: &TemplateData, variant: Variant) -> RenderedEmail {
    match email_type {
        EmailType::Welcome => content::welcome(data, variant),
        EmailType::Day1 => content::day1(data, variant),
        EmailType::Day3 => content::day3(data, variant),
        EmailType::Day7 => content::day7(data, variant),
        EmailType::Day10 => content::day10(data, variant),
        EmailType::Day13 => content::day13(data, variant),
        EmailType::Day15 => content::day15(data, variant),
    }
}
