//! Daily price index series (IPCA) built from monthly variations.

use lastro_core::calendars::Calendar;
use lastro_core::Date;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::error::{CurveError, CurveResult};
use crate::store::PriceIndexStore;

/// Decimal places kept for stored index values.
const INDEX_DECIMALS: u32 = 12;

/// A daily price index keyed by date.
///
/// Usually built with [`DailyPriceIndex::from_monthly`]; file and database
/// backends fill it with [`DailyPriceIndex::insert`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyPriceIndex {
    values: BTreeMap<Date, Decimal>,
}

impl DailyPriceIndex {
    /// Creates an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one value.
    ///
    /// # Errors
    ///
    /// [`CurveError::DuplicateIndexDate`] if the date already has a value.
    pub fn insert(&mut self, date: Date, value: Decimal) -> CurveResult<()> {
        if self.values.contains_key(&date) {
            return Err(CurveError::DuplicateIndexDate { date });
        }
        self.values.insert(date, value);
        Ok(())
    }

    /// Builds the daily index from monthly percentage variations.
    ///
    /// Each month's factor `1 + pct/100` is spread geometrically over the
    /// business days of that month, so every business day compounds
    /// `factor^(1/bd_in_month)`. The index is 1 on `base_date` and defined
    /// on every business day after it until the first month missing from
    /// `monthly_pct`.
    ///
    /// `monthly_pct` is keyed by `(year, month)`.
    pub fn from_monthly<C: Calendar>(
        base_date: Date,
        monthly_pct: &BTreeMap<(i32, u32), f64>,
        calendar: &C,
    ) -> CurveResult<Self> {
        let mut month_start = Date::from_ymd(base_date.year(), base_date.month(), 1)
            .map_err(|e| CurveError::invalid_input(e.to_string()))?;
        if !monthly_pct.contains_key(&(month_start.year(), month_start.month())) {
            return Err(CurveError::invalid_input(format!(
                "no variation published for the month of {base_date}"
            )));
        }

        let mut series = Self::new();
        series.insert(base_date, Decimal::ONE)?;

        let mut level = 1.0_f64;
        while let Some(&pct) = monthly_pct.get(&(month_start.year(), month_start.month())) {
            let business_days: Vec<Date> = (0..i64::from(month_start.days_in_month()))
                .map(|offset| month_start.add_days(offset))
                .filter(|date| calendar.is_business_day(*date))
                .collect();

            if !business_days.is_empty() {
                let daily_factor = (1.0 + pct / 100.0).powf(1.0 / business_days.len() as f64);
                for date in business_days {
                    if date <= base_date {
                        continue;
                    }
                    level *= daily_factor;
                    series.insert(date, to_decimal(level)?)?;
                }
            }

            month_start = month_start
                .add_months(1)
                .map_err(|e| CurveError::invalid_input(e.to_string()))?;
        }

        log::debug!(
            "built daily price index from {base_date} with {} values",
            series.len()
        );
        Ok(series)
    }

    /// Number of dated values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the series has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Last date with a value.
    pub fn last_date(&self) -> Option<Date> {
        self.values.keys().next_back().copied()
    }

    /// Iterates `(date, value)` pairs in date order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, Decimal)> + '_ {
        self.values.iter().map(|(d, v)| (*d, *v))
    }
}

impl PriceIndexStore for DailyPriceIndex {
    fn get_index(&self, date: Date) -> CurveResult<Decimal> {
        self.values
            .get(&date)
            .copied()
            .ok_or(CurveError::IndexNotFound { date })
    }
}

fn to_decimal(value: f64) -> CurveResult<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(INDEX_DECIMALS))
        .ok_or_else(|| CurveError::invalid_input(format!("index level {value} is not representable")))
}
