//! Error types for curve and index operations.

use lastro_core::Date;
use lastro_math::MathError;
use thiserror::Error;

use crate::curve::RateSeries;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve and price index operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// No curve points are available for the reference date.
    #[error("No curve found for reference date {reference_date}")]
    EmptyCurve {
        /// The reference date that was looked up.
        reference_date: Date,
    },

    /// A point belongs to a different reference date than its curve.
    #[error("Reference date mismatch: expected {expected}, got {got}")]
    ReferenceDateMismatch {
        /// Expected reference date.
        expected: Date,
        /// Actual reference date.
        got: Date,
    },

    /// Two points share the same `(reference_date, business_days)` key.
    #[error("Duplicate curve point for {reference_date} at {business_days} business days")]
    DuplicateTenor {
        /// Reference date of the duplicated point.
        reference_date: Date,
        /// Business-day tenor of the duplicated point.
        business_days: u32,
    },

    /// No vertex of the curve publishes the requested series.
    #[error("No {series} rates published on the curve for {reference_date}")]
    MissingSeries {
        /// Reference date of the curve.
        reference_date: Date,
        /// The series that was looked up.
        series: RateSeries,
    },

    /// No price index value for a date.
    #[error("No price index value for {date}")]
    IndexNotFound {
        /// The date that was looked up.
        date: Date,
    },

    /// Two index values share the same date.
    #[error("Duplicate price index value for {date}")]
    DuplicateIndexDate {
        /// The duplicated date.
        date: Date,
    },

    /// Interpolation failed.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] MathError),

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl CurveError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns true when the error means reference data is missing rather
    /// than a computation failure.
    pub fn is_missing_data(&self) -> bool {
        matches!(
            self,
            Self::EmptyCurve { .. } | Self::MissingSeries { .. } | Self::IndexNotFound { .. }
        )
    }
}
