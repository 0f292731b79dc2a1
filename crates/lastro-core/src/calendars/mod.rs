//! Business day calendars.
//!
//! This module provides:
//! - the [`Calendar`] trait with business day counting
//! - [`AnbimaCalendar`], the Brazilian national calendar the curve tenors use
//! - [`WeekendCalendar`], a holiday-free calendar for tests

mod anbima;
mod bitmap;

pub use anbima::AnbimaCalendar;
pub use bitmap::{HolidayBitmap, HolidayCalendarBuilder, MAX_YEAR, MIN_YEAR};

use crate::types::Date;

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays
/// for a specific market or jurisdiction.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Counts business days strictly after `start` up to and including `end`.
    ///
    /// When `end` precedes `start` the dates are swapped and the count is
    /// negated.
    fn business_days_between(&self, start: Date, end: Date) -> i64 {
        if end < start {
            return -self.business_days_between(end, start);
        }

        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

impl<C: Calendar + ?Sized> Calendar for &C {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn is_business_day(&self, date: Date) -> bool {
        (**self).is_business_day(date)
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;

        assert!(cal.is_business_day(Date::from_ymd(2025, 1, 6).unwrap()));
        assert!(!cal.is_business_day(Date::from_ymd(2025, 1, 4).unwrap()));
        assert!(cal.is_holiday(Date::from_ymd(2025, 1, 5).unwrap()));
    }

    #[test]
    fn test_business_days_between() {
        let cal = WeekendCalendar;

        // Monday to Friday = 4 business days (Tue, Wed, Thu, Fri)
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        let friday = Date::from_ymd(2025, 1, 10).unwrap();

        assert_eq!(cal.business_days_between(monday, friday), 4);
        assert_eq!(cal.business_days_between(friday, monday), -4);
        assert_eq!(cal.business_days_between(monday, monday), 0);
    }

    #[test]
    fn test_end_on_weekend() {
        let cal = WeekendCalendar;
        // Friday to Sunday: the weekend adds nothing
        let friday = Date::from_ymd(2025, 1, 3).unwrap();
        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        assert_eq!(cal.business_days_between(friday, sunday), 0);
    }

    #[test]
    fn test_calendar_by_reference() {
        fn count<C: Calendar>(cal: C, a: Date, b: Date) -> i64 {
            cal.business_days_between(a, b)
        }
        let cal = WeekendCalendar;
        let a = Date::from_ymd(2025, 1, 6).unwrap();
        let b = Date::from_ymd(2025, 1, 13).unwrap();
        assert_eq!(count(&cal, a, b), 5);
    }
}
