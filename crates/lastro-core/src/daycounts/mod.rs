//! Day count conventions for cashflow valuation.
//!
//! Two conventions drive every time fraction in the engine:
//!
//! - [`Thirty360US`]: 30/360 US, the Excel `DAYS360` method used for the
//!   market yield (XIRR) and the flat-rate NPV
//! - [`BusinessDays252`]: business days on a calendar over a 252-day year,
//!   used against the sovereign curve
//!
//! [`Thirty360E`] (Eurobond basis) is provided for the European `DAYS360`
//! variant.
//!
//! # Usage
//!
//! ```rust
//! use lastro_core::daycounts::{DayCount, Thirty360US};
//! use lastro_core::types::Date;
//!
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! assert_eq!(Thirty360US.day_count(start, end), 180);
//! assert!((Thirty360US.year_fraction(start, end) - 0.5).abs() < 1e-12);
//! ```

mod business252;
mod thirty360;

pub use business252::{BusinessDays252, BUSINESS_DAYS_PER_YEAR};
pub use thirty360::{Thirty360E, Thirty360US};

use crate::types::Date;

/// Trait for day count conventions.
///
/// - `day_count` returns the number of days according to the convention
/// - `year_fraction` divides that count by the convention's year basis
/// - Implementations must be thread-safe (`Send + Sync`)
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the day count between two dates.
    ///
    /// Negative if `end` precedes `start`.
    fn day_count(&self, start: Date, end: Date) -> i64;

    /// Number of days in a year under this convention.
    fn year_basis(&self) -> f64;

    /// Calculates the year fraction between two dates.
    fn year_fraction(&self, start: Date, end: Date) -> f64 {
        self.day_count(start, end) as f64 / self.year_basis()
    }
}
