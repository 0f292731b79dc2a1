//! Business-day/252 day count.

use super::DayCount;
use crate::calendars::{AnbimaCalendar, Calendar};
use crate::types::Date;

/// Business days assumed in one year on the 252 basis.
pub const BUSINESS_DAYS_PER_YEAR: f64 = 252.0;

/// BUS/252 day count: business days on a calendar over a 252-day year.
///
/// The count excludes `start` and includes `end`, as
/// [`Calendar::business_days_between`] does. The sovereign curve tenors and
/// the curve-based discounting both use this basis.
#[derive(Debug, Clone, Copy)]
pub struct BusinessDays252<C: Calendar> {
    calendar: C,
}

impl<C: Calendar> BusinessDays252<C> {
    /// Creates the convention over the given calendar.
    pub fn new(calendar: C) -> Self {
        Self { calendar }
    }

    /// Returns the underlying calendar.
    pub fn calendar(&self) -> &C {
        &self.calendar
    }
}

impl BusinessDays252<&'static AnbimaCalendar> {
    /// BUS/252 on the ANBIMA calendar.
    pub fn anbima() -> Self {
        Self::new(AnbimaCalendar::global())
    }
}

impl<C: Calendar> DayCount for BusinessDays252<C> {
    fn name(&self) -> &'static str {
        "BUS/252"
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        self.calendar.business_days_between(start, end)
    }

    fn year_basis(&self) -> f64 {
        BUSINESS_DAYS_PER_YEAR
    }
}
