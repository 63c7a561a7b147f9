use validator::validate_email;

/// A validated coach email, normalized to lowercase so uniqueness checks are
/// case-insensitive.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CoachEmail(String);

impl CoachEmail {
    pub fn parse(email: String) -> Result<CoachEmail, String> {
        let normalized = email.trim().to_lowercase();
        let is_valid_email = validate_email(&normalized);

        if !is_valid_email {
            return Err(format!("{} email is not valid", email));
        }

        Ok(Self(normalized))
    }
}

impl AsRef<str> for CoachEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
