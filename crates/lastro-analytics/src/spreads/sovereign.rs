//! Spread of the market yield over the sovereign curve.

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::yields::RateOutcome;

/// `xirr - lookup_rate`, both as decimals.
///
/// Fails when the market yield is undefined or no lookup rate was read from
/// the curve.
pub fn sovereign_spread(xirr: &RateOutcome, lookup_rate: Option<f64>) -> AnalyticsResult<f64> {
    let market = xirr.require("XIRR")?;
    let lookup = lookup_rate
        .ok_or_else(|| AnalyticsError::undefined("curve lookup rate", "no duration anchor"))?;
    Ok(market - lookup)
}

/// A decimal spread in basis points.
pub fn to_bps(spread: f64) -> f64 {
    spread * 10_000.0
}
