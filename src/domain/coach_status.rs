#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoachStatus {
    TrialActive,
    TrialExpired,
    Upgraded,
    Cancelled,
}

impl CoachStatus {
    pub fn is_trial_active(&self) -> bool {
        matches!(self, CoachStatus::TrialActive)
    }

    pub fn is_trial_expired(&self) -> bool {
        matches!(self, CoachStatus::TrialExpired)
    }

    pub fn parse(status: String) -> Result<CoachStatus, String> {
        match status.as_str() {
            "trial_active" => Ok(CoachStatus::TrialActive),
            "trial_expired" => Ok(CoachStatus::TrialExpired),
            "upgraded" => Ok(CoachStatus::Upgraded),
            "cancelled" => Ok(CoachStatus::Cancelled),
            _ => Err(format!("{} is not a valid coach status", status)),
        }
    }
}

impl AsRef<str> for CoachStatus {
    fn as_ref(&self) -> &str {
        match self {
            CoachStatus::TrialActive => "trial_active",
            CoachStatus::TrialExpired => "trial_expired",
            CoachStatus::Upgraded => "upgraded",
            CoachStatus::Cancelled => "cancelled",
        }
    }
}
