//! Domain error types
//!
//! All errors are domain-specific and don't expose third-party types.
//! Validation failures are not errors: a candidate that fails its validator
//! is simply excluded from detection results.

use thiserror::Error;

/// Main piiguard error type
#[derive(Debug, Error)]
pub enum PiiError {
    /// A detection rule's pattern failed to compile
    #[error("Invalid pattern for '{pii_type}': {message}")]
    Pattern {
        /// Type the rule was registered for
        pii_type: String,
        /// Compiler error message
        message: String,
    },

    /// A match violates the span contract and cannot be spliced safely
    #[error("Invalid match: {0}")]
    InvalidMatch(String),

    /// An anonymization strategy name outside the supported set
    #[error("Unknown anonymization strategy: {0}")]
    UnknownStrategy(String),

    /// Input text exceeds the configured size limit
    #[error("Input of {len} bytes exceeds the {max} byte limit")]
    InputTooLarge {
        /// Input length in bytes
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// A batch worker task failed to complete
    #[error("Batch worker failed: {0}")]
    Worker(String),

    /// Work was skipped because shutdown was requested
    #[error("Cancelled before processing")]
    Cancelled,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PiiError {
    /// Build a pattern error for a rule
    pub fn pattern(pii_type: impl Into<String>, message: impl ToString) -> Self {
        Self::Pattern {
            pii_type: pii_type.into(),
            message: message.to_string(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PiiError {
    fn from(err: std::io::Error) -> Self {
        PiiError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PiiError {
    fn from(err: serde_json::Error) -> Self {
        PiiError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PiiError {
    fn from(err: toml::de::Error) -> Self {
        PiiError::Configuration(format!("TOML parse error: {err}"))
    }
}
