//! Confidence value handling.
//!
//! Confidence is stored as text with a trailing `%`. Which value ends up in
//! the store is decided by a single [`ConfidencePolicy`] shared by the
//! single-record and bulk ingestion paths.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

/// Lower bound (inclusive) of a sampled confidence score.
pub const RANDOM_CONFIDENCE_MIN: u8 = 80;

/// Upper bound (inclusive) of a sampled confidence score.
pub const RANDOM_CONFIDENCE_MAX: u8 = 99;

/// Append `%` unless the value already ends with one.
///
/// ```
/// use plantdx_core::confidence::normalize_confidence;
///
/// assert_eq!(normalize_confidence("87"), "87%");
/// assert_eq!(normalize_confidence("87%"), "87%");
/// assert_eq!(normalize_confidence("9%2"), "9%2%");
/// ```
pub fn normalize_confidence(raw: &str) -> String {
    if raw.ends_with('%') {
        raw.to_string()
    } else {
        format!("{raw}%")
    }
}

/// Sample a confidence score in `[80, 99]`, rendered as e.g. `"91%"`.
pub fn random_confidence<R: Rng + ?Sized>(rng: &mut R) -> String {
    let score = rng.random_range(RANDOM_CONFIDENCE_MIN..=RANDOM_CONFIDENCE_MAX);
    format!("{score}%")
}

/// How the stored confidence is derived from the caller's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfidencePolicy {
    /// Keep the caller's value, normalized to carry `%`.
    #[default]
    Preserve,
    /// Replace the caller's value with a sampled score in `[80, 99]`.
    Randomize,
}

impl ConfidencePolicy {
    /// Resolve the confidence text to persist for a caller-supplied value.
    pub fn apply(self, supplied: &str) -> String {
        match self {
            Self::Preserve => normalize_confidence(supplied),
            Self::Randomize => random_confidence(&mut rand::rng()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preserve => "preserve",
            Self::Randomize => "randomize",
        }
    }
}

impl fmt::Display for ConfidencePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown confidence policy '{0}' (expected 'preserve' or 'randomize')")]
pub struct UnknownPolicy(pub String);

impl FromStr for ConfidencePolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "randomize" | "random" => Ok(Self::Randomize),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}
