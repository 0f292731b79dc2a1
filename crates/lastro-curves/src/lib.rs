//! # Lastro Curves
//!
//! Sovereign zero curve lookups and price index series.
//!
//! - [`YieldCurve`]: the ANBIMA curve for one reference date, with log-linear
//!   interpolation over business-day tenors and nearest-tenor lookup
//! - [`CurveStore`] / [`PriceIndexStore`]: the read-only lookups the
//!   valuation engine consumes
//! - [`InMemoryCurveStore`] and [`DailyPriceIndex`]: in-memory backends
//!
//! ## Example
//!
//! ```rust
//! use lastro_core::Date;
//! use lastro_curves::prelude::*;
//!
//! let reference = Date::from_ymd(2025, 8, 28).unwrap();
//! let store = InMemoryCurveStore::from_points([
//!     YieldCurvePoint::new(reference, 126, 5.0, 5.0, 0.0),
//!     YieldCurvePoint::new(reference, 252, 6.0, 6.0, 0.0),
//! ])
//! .unwrap();
//!
//! let curve = store.load_curve(reference).unwrap();
//! let rate = curve.rate_at_tenor(189, RateSeries::Nominal).unwrap();
//! assert!(rate > 0.05 && rate < 0.06);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]

pub mod curve;
pub mod error;
pub mod index;
pub mod store;

pub use curve::{InterpolatedRates, RateSeries, YieldCurve, YieldCurvePoint, DEFAULT_RATE_FLOOR};
pub use error::{CurveError, CurveResult};
pub use index::DailyPriceIndex;
pub use store::{CurveStore, InMemoryCurveStore, PriceIndexStore};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curve::{InterpolatedRates, RateSeries, YieldCurve, YieldCurvePoint};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::index::DailyPriceIndex;
    pub use crate::store::{CurveStore, InMemoryCurveStore, PriceIndexStore};
}
