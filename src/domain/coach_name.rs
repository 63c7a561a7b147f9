use unicode_segmentation::UnicodeSegmentation;

const MAX_CHAR_LENGHT: usize = 256;
const FORBIDDEN_CHARS: [char; 9] = ['/', '{', '}', '"', '>', '<', '\\', '(', ')'];

/// The full name a coach signs up with. Split into first/last on whitespace
/// when persisted.
#[derive(Debug, serde::Serialize)]
pub struct CoachName(String);

impl CoachName {
    pub fn parse(name: String) -> Result<CoachName, String> {
        let is_empty_or_whitespace = name.trim().is_empty();
        let is_too_long = name.graphemes(true).count() > MAX_CHAR_LENGHT;
        let contains_forbidden_chars = name.chars().any(|char| FORBIDDEN_CHARS.contains(&char));

        if is_empty_or_whitespace || is_too_long || contains_forbidden_chars {
            return Err(format!("{} is not a valid coach name", name));
        }

        Ok(Self(name))
    }

    pub fn first_name(&self) -> String {
        self.0
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Everything after the first whitespace-separated token; empty for
    /// single-word names.
    pub fn last_name(&self) -> String {
        let mut parts = self.0.split_whitespace();
        parts.next();

        parts.collect::<Vec<&str>>().join(" ")
    }
}

impl AsRef<str> for CoachName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
