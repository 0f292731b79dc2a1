//! Error types for schedule generation.

use lastro_core::CoreError;
use thiserror::Error;

/// A specialized Result type for cashflow operations.
pub type CashflowResult<T> = Result<T, CashflowError>;

/// Errors raised while validating terms or generating a schedule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CashflowError {
    /// A required term is missing.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// The terms are present but inconsistent or out of range.
    #[error("Invalid cashflow terms: {reason}")]
    InvalidTerms {
        /// Description of what's invalid.
        reason: String,
    },

    /// A textual convention could not be recognised.
    #[error("Unsupported {kind}: '{value}'")]
    Unsupported {
        /// Which convention was being parsed.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Date arithmetic failed.
    #[error("Date error: {0}")]
    Core(#[from] CoreError),
}

impl CashflowError {
    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid terms error.
    #[must_use]
    pub fn invalid_terms(reason: impl Into<String>) -> Self {
        Self::InvalidTerms {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported convention error.
    #[must_use]
    pub fn unsupported(kind: &'static str, value: impl Into<String>) -> Self {
        Self::Unsupported {
            kind,
            value: value.into(),
        }
    }
}
