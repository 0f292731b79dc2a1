//! Market yield of a cashflow stream.
//!
//! The market yield is the XIRR of the remaining flows, optionally preceded
//! by the purchase cost on the reference date. Times are measured on 30/360
//! (Excel `DAYS360`), so a full year between two same-day dates is exactly 1.

mod xirr;

pub use xirr::{current_xirr, xirr, RateOutcome, UndefinedReason, XirrResult, XirrTableRow};
