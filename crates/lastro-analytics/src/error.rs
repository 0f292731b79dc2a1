//! Error types for the valuation engine.
//!
//! Failures fall into three families that callers treat differently:
//! bad inputs, rates that cannot be resolved, and reference data that is
//! not available yet.

use lastro_cashflows::CashflowError;
use lastro_core::Date;
use lastro_curves::CurveError;
use thiserror::Error;

use crate::config::ConfigError;

/// A specialized Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Unified error type for valuation operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Invalid input parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A rate or duration has no defined value for these cashflows.
    #[error("undefined {what}: {reason}")]
    UndefinedRate {
        /// Which quantity could not be resolved.
        what: &'static str,
        /// Why.
        reason: String,
    },

    /// A curve or index value needed for the valuation is not stored.
    #[error("missing reference data: {0}")]
    MissingData(String),

    /// Schedule generation failed.
    #[error(transparent)]
    Cashflow(#[from] CashflowError),

    /// Curve lookup failed.
    #[error(transparent)]
    Curve(CurveError),

    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AnalyticsError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Creates an undefined rate error.
    #[must_use]
    pub fn undefined(what: &'static str, reason: impl Into<String>) -> Self {
        Self::UndefinedRate {
            what,
            reason: reason.into(),
        }
    }

    /// Creates a missing curve error.
    #[must_use]
    pub fn missing_curve(reference_date: Date) -> Self {
        Self::MissingData(format!("no curve for reference date {reference_date}"))
    }

    /// Creates a missing index value error.
    #[must_use]
    pub fn missing_index(date: Date) -> Self {
        Self::MissingData(format!("no price index value for {date}"))
    }

    /// Returns true if fetching reference data and retrying may succeed.
    pub fn is_data_availability(&self) -> bool {
        matches!(self, Self::MissingData(_))
    }
}

impl From<CurveError> for AnalyticsError {
    fn from(err: CurveError) -> Self {
        match err {
            CurveError::EmptyCurve { reference_date } => Self::missing_curve(reference_date),
            CurveError::IndexNotFound { date } => Self::missing_index(date),
            CurveError::MissingSeries {
                reference_date,
                series,
            } => Self::MissingData(format!(
                "no {series} rates on the curve for reference date {reference_date}"
            )),
            other => Self::Curve(other),
        }
    }
}
