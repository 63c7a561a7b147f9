/// The fixed trial email sequence, ordered by trial-day offset.
///
/// A coach only ever moves forward through this list; the batch processor
/// sends at most one of these per run per coach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailType {
    Welcome,
    Day1,
    Day3,
    Day7,
    Day10,
    Day13,
    Day15,
}

impl EmailType {
    pub const SCHEDULE: [EmailType; 7] = [
        EmailType::Welcome,
        EmailType::Day1,
        EmailType::Day3,
        EmailType::Day7,
        EmailType::Day10,
        EmailType::Day13,
        EmailType::Day15,
    ];

    /// Days after `trial_start` at which this email becomes due.
    pub fn day_offset(&self) -> i64 {
        match self {
            EmailType::Welcome => 0,
            EmailType::Day1 => 1,
            EmailType::Day3 => 3,
            EmailType::Day7 => 7,
            EmailType::Day10 => 10,
            EmailType::Day13 => 13,
            EmailType::Day15 => 15,
        }
    }

    /// Position in the fixed schedule, used for "strictly after the last
    /// sent type" comparisons.
    pub fn schedule_index(&self) -> usize {
        Self::SCHEDULE
            .iter()
            .position(|email_type| email_type == self)
            .expect("every email type is part of the schedule")
    }

    /// Unknown identifiers are a hard error. There is deliberately no
    /// fallback template.
    pub fn parse(email_type: String) -> Result<EmailType, String> {
        match email_type.as_str() {
            "welcome" => Ok(EmailType::Welcome),
            "day1" => Ok(EmailType::Day1),
            "day3" => Ok(EmailType::Day3),
            "day7" => Ok(EmailType::Day7),
            "day10" => Ok(EmailType::Day10),
            "day13" => Ok(EmailType::Day13),
            "day15" => Ok(EmailType::Day15),
            _ => Err(format!("{} is not a valid email type", email_type)),
        }
    }
}

impl AsRef<str> for EmailType {
    fn as_ref(&self) -> &str {
        match self {
            EmailType::Welcome => "welcome",
            EmailType::Day1 => "day1",
            EmailType::Day3 => "day3",
            EmailType::Day7 => "day7",
            EmailType::Day10 => "day10",
            EmailType::Day13 => "day13",
            EmailType::Day15 => "day15",
        }
    }
}
