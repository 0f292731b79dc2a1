//! Effective rate conversions between annual and monthly compounding periods.

/// Converts an annual effective rate into the equivalent monthly effective rate.
///
/// `(1 + annual)^(1/12) - 1`. A zero annual rate yields exactly zero.
#[must_use]
pub fn annual_to_monthly_effective(annual: f64) -> f64 {
    (1.0 + annual).powf(1.0 / 12.0) - 1.0
}

/// Converts a monthly effective rate into the equivalent annual effective rate.
#[must_use]
pub fn monthly_to_annual_effective(monthly: f64) -> f64 {
    (1.0 + monthly).powi(12) - 1.0
}
