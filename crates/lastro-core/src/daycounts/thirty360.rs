//! 30/360 day count conventions.
//!
//! Both variants follow the spreadsheet `DAYS360` function, which is how
//! the market yield of a receivables certificate is quoted.

use super::DayCount;
use crate::types::Date;

/// Shared `360*(Y2-Y1) + 30*(M2-M1) + (D2-D1)` once the days are clamped.
#[inline]
fn thirty360_days(start: Date, end: Date, d1: i64, d2: i64) -> i64 {
    let y1 = start.year() as i64;
    let y2 = end.year() as i64;
    let m1 = start.month() as i64;
    let m2 = end.month() as i64;

    360 * (y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}

/// 30/360 US day count convention (Excel `DAYS360` US method).
///
/// # Rules
///
/// 1. If D1 is 31, change D1 to 30
/// 2. If D2 is 31 AND D1 is now 30, change D2 to 30
///
/// There is no February end-of-month adjustment: Feb 28 counts as day 28.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360US;

impl DayCount for Thirty360US {
    fn name(&self) -> &'static str {
        "30/360 US"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let mut d1 = start.day() as i64;
        let mut d2 = end.day() as i64;

        if d1 == 31 {
            d1 = 30;
        }
        if d2 == 31 && d1 == 30 {
            d2 = 30;
        }

        thirty360_days(start, end, d1, d2)
    }

    fn year_basis(&self) -> f64 {
        360.0
    }
}

/// 30E/360 day count convention (Excel `DAYS360` European method).
///
/// Day 31 becomes 30 on both ends, unconditionally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = (start.day() as i64).min(30);
        let d2 = (end.day() as i64).min(30);

        thirty360_days(start, end, d1, d2)
    }

    fn year_basis(&self) -> f64 {
        360.0
    }
}
