use rand::Rng;

/// A/B test label. Picks alternate subject/copy for the same email type and
/// never affects sequence logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    A,
    B,
}

impl Variant {
    pub fn parse(variant: String) -> Result<Variant, String> {
        match variant.as_str() {
            "a" => Ok(Variant::A),
            "b" => Ok(Variant::B),
            _ => Err(format!("{} is not a valid variant, use 'a' or 'b'", variant)),
        }
    }

    /// Coin flip used by the batch processor.
    pub fn pick_random() -> Variant {
        if rand::thread_rng().gen_bool(0.5) {
            Variant::A
        } else {
            Variant::B
        }
    }
}

impl AsRef<str> for Variant {
    fn as_ref(&self) -> &str {
        match self {
            Variant::A => "a",
            Variant::B => "b",
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::A
    }
}
