//! Error types for punchcard construction.
//!
//! Every failure is detected while a [`PunchcardSet`](crate::services::PunchcardSet)
//! is being built; once a set exists it is complete and immutable.

use chrono::NaiveDateTime;

/// Result type for punchcard operations
pub type PunchcardResult<T> = Result<T, PunchcardError>;

/// Error type for punchcard operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PunchcardError {
    /// No identity carries a single observation, so there are no bounds.
    #[error("Empty dataset: no observations to build a punchcard from")]
    EmptyDataset,

    /// A color endpoint is not six hexadecimal digits.
    #[error("Malformed color '{input}': {reason}")]
    MalformedColor { input: String, reason: String },

    /// An observation value is negative, NaN or infinite.
    #[error("Invalid observation #{index} for '{identity}': value {value} must be finite and non-negative")]
    InvalidObservation {
        identity: String,
        index: usize,
        value: f64,
    },

    /// A bucket total overflowed to infinity.
    #[error("Bucket total for '{identity}' overflows: values are too large to sum")]
    ValueOverflow { identity: String },

    /// Calendar arithmetic left the range chrono can represent.
    #[error("Date out of range while stepping from {instant}")]
    DateOutOfRange { instant: NaiveDateTime },

    /// The caller-supplied converter rejected the raw data.
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Build options could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl PunchcardError {
    /// Shorthand for a [`PunchcardError::MalformedColor`].
    pub fn malformed_color(input: impl Into<String>, reason: impl Into<String>) -> Self {
        PunchcardError::MalformedColor {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

impl From<anyhow::Error> for PunchcardError {
    fn from(err: anyhow::Error) -> Self {
        PunchcardError::Conversion(format!("{:#}", err))
    }
}
