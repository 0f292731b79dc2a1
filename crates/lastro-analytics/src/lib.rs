//! # Lastro Analytics
//!
//! Valuation of securitized receivables certificates.
//!
//! - **Yields**: market XIRR of the remaining flows on 30/360
//! - **Pricing**: NPV at a flat rate, and against the sovereign zero curve
//!   on business days/252
//! - **Risk**: Macaulay duration over the positive flows
//! - **Spreads**: market yield over the curve rate at the market duration
//! - **Engine**: the whole chain for one certificate, with IPCA price
//!   deflation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lastro_analytics::prelude::*;
//!
//! let engine = ValuationEngine::new(&curve_store, &index_store);
//! let result = engine.analyze(&input, reference_date, Some(1012.5), Some(1000.0))?;
//! println!("spread: {:.2} bps", to_bps(result.spread));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::float_cmp)]

pub mod config;
pub mod engine;
pub mod error;
pub mod flows;
pub mod pricing;
pub mod risk;
pub mod spreads;
pub mod yields;

pub use config::{ConfigError, ValidationError, ValuationConfig};
pub use engine::{curve_series, ValuationEngine, ValuationResult};
pub use error::{AnalyticsError, AnalyticsResult};
pub use flows::{Cashflow, Purchase};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::ValuationConfig;
    pub use crate::engine::{ValuationEngine, ValuationResult};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::flows::{future_flows, schedule_flows, Cashflow, Purchase};
    pub use crate::pricing::{npv, npv_vs_curve, CurveValuation, MarketValuation};
    pub use crate::risk::macaulay_duration;
    pub use crate::spreads::{sovereign_spread, to_bps};
    pub use crate::yields::{current_xirr, xirr, RateOutcome, UndefinedReason, XirrResult};
}
