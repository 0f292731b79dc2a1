//! ANBIMA national calendar for Brazilian fixed income.
//!
//! ANBIMA publishes the sovereign zero curve with tenors counted in business
//! days on this calendar, so every curve tenor and BUS/252 fraction in the
//! engine is counted here.

use super::bitmap::{HolidayBitmap, HolidayCalendarBuilder, MAX_YEAR, MIN_YEAR};
use super::Calendar;
use crate::types::Date;
use std::sync::OnceLock;

static ANBIMA_CALENDAR: OnceLock<AnbimaCalendar> = OnceLock::new();

/// First year Black Consciousness Day is a national holiday.
const BLACK_CONSCIOUSNESS_FROM: i32 = 2024;

/// ANBIMA holiday calendar.
///
/// ## Holidays
///
/// - Confraternização Universal (January 1)
/// - Carnival Monday and Tuesday (Easter - 48, Easter - 47)
/// - Good Friday (Easter - 2)
/// - Tiradentes (April 21)
/// - Labour Day (May 1)
/// - Corpus Christi (Easter + 60)
/// - Independence Day (September 7)
/// - Nossa Senhora Aparecida (October 12)
/// - Finados (November 2)
/// - Proclamação da República (November 15)
/// - Dia da Consciência Negra (November 20, from 2024)
/// - Christmas (December 25)
///
/// Holidays falling on a weekend are not moved.
#[derive(Debug, Clone)]
pub struct AnbimaCalendar {
    bitmap: HolidayBitmap,
}

impl AnbimaCalendar {
    /// Create a new ANBIMA calendar.
    pub fn new() -> Self {
        Self {
            bitmap: build_anbima_holidays(),
        }
    }

    /// Get the global ANBIMA calendar instance.
    pub fn global() -> &'static AnbimaCalendar {
        ANBIMA_CALENDAR.get_or_init(AnbimaCalendar::new)
    }
}

impl Default for AnbimaCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl Calendar for AnbimaCalendar {
    fn name(&self) -> &'static str {
        "ANBIMA"
    }

    fn is_business_day(&self, date: Date) -> bool {
        self.bitmap.is_business_day(date.as_naive_date())
    }
}

fn build_anbima_holidays() -> HolidayBitmap {
    HolidayCalendarBuilder::new("ANBIMA")
        .year_range(MIN_YEAR, MAX_YEAR)
        .add_fixed_holiday(1, 1)
        // Carnival
        .add_easter_holiday(-48)
        .add_easter_holiday(-47)
        .add_easter_holiday(-2)
        .add_fixed_holiday(4, 21)
        .add_fixed_holiday(5, 1)
        // Corpus Christi
        .add_easter_holiday(60)
        .add_fixed_holiday(9, 7)
        .add_fixed_holiday(10, 12)
        .add_fixed_holiday(11, 2)
        .add_fixed_holiday(11, 15)
        .add_fixed_holiday_from(11, 20, BLACK_CONSCIOUSNESS_FROM)
        .add_fixed_holiday(12, 25)
        .build()
}
