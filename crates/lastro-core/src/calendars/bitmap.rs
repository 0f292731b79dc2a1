//! Bitmap-based holiday calendar for O(1) lookups.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

/// Minimum year supported by the calendar.
pub const MIN_YEAR: i32 = 1970;
/// Maximum year supported by the calendar.
pub const MAX_YEAR: i32 = 2100;

const YEAR_COUNT: usize = (MAX_YEAR - MIN_YEAR + 1) as usize;

const MAX_DAYS_PER_YEAR: usize = 366;

const TOTAL_BITS: usize = YEAR_COUNT * MAX_DAYS_PER_YEAR;

const WORD_COUNT: usize = (TOTAL_BITS + 63) / 64;

/// Holiday bitmap with Saturday/Sunday weekends.
///
/// Each bit is one day of the supported range; a set bit marks a holiday.
/// Dates outside `MIN_YEAR..=MAX_YEAR` are never holidays.
#[derive(Clone)]
pub struct HolidayBitmap {
    name: &'static str,
    bits: Box<[u64]>,
}

impl std::fmt::Debug for HolidayBitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidayBitmap")
            .field("name", &self.name)
            .field("holiday_count", &self.count_holidays())
            .finish()
    }
}

impl HolidayBitmap {
    /// Create a new empty holiday bitmap.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            bits: vec![0u64; WORD_COUNT].into_boxed_slice(),
        }
    }

    /// Create a holiday bitmap from a set of holiday dates.
    pub fn from_holidays(name: &'static str, holidays: &HashSet<NaiveDate>) -> Self {
        let mut bitmap = Self::new(name);
        for &date in holidays {
            bitmap.add_holiday(date);
        }
        bitmap
    }

    /// Get the name of this calendar.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Add a holiday to the bitmap.
    pub fn add_holiday(&mut self, date: NaiveDate) {
        if let Some((word_idx, bit_idx)) = Self::date_to_indices(date) {
            self.bits[word_idx] |= 1u64 << bit_idx;
        }
    }

    /// Check if a date is a holiday (excluding weekends).
    #[inline]
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        Self::date_to_indices(date)
            .is_some_and(|(word_idx, bit_idx)| (self.bits[word_idx] & (1u64 << bit_idx)) != 0)
    }

    /// Check if a date is a business day: neither a weekend nor a holiday.
    #[inline]
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        !self.is_holiday(date)
    }

    /// Count total holidays in the bitmap.
    pub fn count_holidays(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns (word_index, bit_index) or None if date is out of range.
    #[inline]
    fn date_to_indices(date: NaiveDate) -> Option<(usize, usize)> {
        let year = date.year();
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }

        let year_offset = (year - MIN_YEAR) as usize;
        let bit_position = year_offset * MAX_DAYS_PER_YEAR + date.ordinal0() as usize;

        Some((bit_position / 64, bit_position % 64))
    }
}

/// Builder for holiday bitmaps from fixed and Easter-relative rules.
pub struct HolidayCalendarBuilder {
    name: &'static str,
    holidays: HashSet<NaiveDate>,
    start_year: i32,
    end_year: i32,
}

impl HolidayCalendarBuilder {
    /// Create a new builder covering the full supported range.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            holidays: HashSet::new(),
            start_year: MIN_YEAR,
            end_year: MAX_YEAR,
        }
    }

    /// Set the year range for generating holidays.
    pub fn year_range(mut self, start: i32, end: i32) -> Self {
        self.start_year = start.max(MIN_YEAR);
        self.end_year = end.min(MAX_YEAR);
        self
    }

    /// Add a specific holiday date.
    pub fn add_holiday(mut self, date: NaiveDate) -> Self {
        self.holidays.insert(date);
        self
    }

    /// Add a fixed holiday (same date every year, no weekend observation).
    pub fn add_fixed_holiday(self, month: u32, day: u32) -> Self {
        let from = self.start_year;
        self.add_fixed_holiday_from(month, day, from)
    }

    /// Add a fixed holiday starting from a specific year.
    pub fn add_fixed_holiday_from(mut self, month: u32, day: u32, from_year: i32) -> Self {
        for year in from_year.max(self.start_year)..=self.end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Add Easter-based holiday (offset from Easter Sunday).
    pub fn add_easter_holiday(mut self, offset_days: i64) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = easter_sunday(year)
                .and_then(|easter| easter.checked_add_signed(chrono::Duration::days(offset_days)))
            {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Build the holiday bitmap.
    pub fn build(self) -> HolidayBitmap {
        HolidayBitmap::from_holidays(self.name, &self.holidays)
    }
}

/// Calculate Easter Sunday using the Anonymous Gregorian algorithm.
#[allow(clippy::many_single_char_names)]
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
