//! Present value of a cashflow stream.
//!
//! - [`npv`]: flat annual rate on 30/360, used at the market yield
//! - [`npv_vs_curve`]: sovereign zero curve on ANBIMA business days/252

mod curve;
mod market;

pub use curve::{npv_vs_curve, CurveTableRow, CurveValuation};
pub use market::{npv, MarketValuation, NpvTableRow};
