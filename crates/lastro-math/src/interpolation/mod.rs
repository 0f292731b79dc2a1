//! Interpolation methods for yield curve lookups.
//!
//! Curve rates are interpolated with [`LogLinearInterpolator`]: linear in
//! `ln(y)` over `x`, which keeps interpolated rates positive and makes the
//! midpoint of two points their geometric mean.

mod log_linear;

pub use log_linear::LogLinearInterpolator;

use crate::error::MathResult;

/// Trait for interpolation methods.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}
