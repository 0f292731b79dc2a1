//! Read-only lookups the valuation engine consumes.
//!
//! The engine never fetches market data itself. A [`CurveStore`] returns the
//! curve points published for a reference date and a [`PriceIndexStore`]
//! returns the daily price index for a date. Backends (database, files,
//! memory) implement these traits.

use lastro_core::Date;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::curve::{YieldCurve, YieldCurvePoint};
use crate::error::{CurveError, CurveResult};

/// Source of published zero curve points.
pub trait CurveStore: Send + Sync {
    /// Returns every point published for `reference_date`, sorted by tenor.
    ///
    /// An empty vector means nothing was published for that date; it is not
    /// an error at this level.
    fn get_curve(&self, reference_date: Date) -> CurveResult<Vec<YieldCurvePoint>>;

    /// Loads the curve for `reference_date`, failing if none was published.
    fn load_curve(&self, reference_date: Date) -> CurveResult<YieldCurve> {
        YieldCurve::new(reference_date, self.get_curve(reference_date)?)
    }
}

/// Source of daily price index values.
pub trait PriceIndexStore: Send + Sync {
    /// Returns the index value on `date`.
    ///
    /// Fails with [`CurveError::IndexNotFound`] when the date has no value.
    fn get_index(&self, date: Date) -> CurveResult<Decimal>;
}

/// Curve points held in memory, keyed by reference date and tenor.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCurveStore {
    curves: BTreeMap<Date, BTreeMap<u32, YieldCurvePoint>>,
}

impl InMemoryCurveStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from points, rejecting duplicate keys.
    pub fn from_points(points: impl IntoIterator<Item = YieldCurvePoint>) -> CurveResult<Self> {
        let mut store = Self::new();
        for point in points {
            store.insert(point)?;
        }
        Ok(store)
    }

    /// Adds a point.
    ///
    /// # Errors
    ///
    /// [`CurveError::DuplicateTenor`] if the `(reference_date, business_days)`
    /// key is already present.
    pub fn insert(&mut self, point: YieldCurvePoint) -> CurveResult<()> {
        let tenors = self.curves.entry(point.reference_date).or_default();
        if tenors.contains_key(&point.business_days) {
            return Err(CurveError::DuplicateTenor {
                reference_date: point.reference_date,
                business_days: point.business_days,
            });
        }
        tenors.insert(point.business_days, point);
        Ok(())
    }

    /// Reference dates with at least one point.
    pub fn reference_dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.curves.keys().copied()
    }

    /// Total number of points.
    pub fn len(&self) -> usize {
        self.curves.values().map(BTreeMap::len).sum()
    }

    /// Returns true if the store holds no points.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

impl CurveStore for InMemoryCurveStore {
    fn get_curve(&self, reference_date: Date) -> CurveResult<Vec<YieldCurvePoint>> {
        Ok(self
            .curves
            .get(&reference_date)
            .map(|tenors| tenors.values().copied().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_get_curve_sorted() {
        let date = d(2025, 8, 28);
        let store = InMemoryCurveStore::from_points([
            YieldCurvePoint::new(date, 504, 7.3, 13.5, 5.8),
            YieldCurvePoint::new(date, 126, 8.1, 14.6, 6.0),
            YieldCurvePoint::new(d(2025, 8, 27), 126, 8.0, 14.5, 6.0),
        ])
        .unwrap();

        let points = store.get_curve(date).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].business_days, 126);
        assert_eq!(points[1].business_days, 504);
        assert_eq!(store.len(), 3);
        assert_eq!(store.reference_dates().count(), 2);
    }

    #[test]
    fn test_missing_date_is_empty_not_error() {
        let store = InMemoryCurveStore::new();
        assert!(store.get_curve(d(2025, 1, 2)).unwrap().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_curve_fails_when_empty() {
        let store = InMemoryCurveStore::new();
        let err = store.load_curve(d(2025, 1, 2)).unwrap_err();
        assert!(err.is_missing_data());
    }

    #[test]
    fn test_duplicate_rejected() {
        let date = d(2025, 8, 28);
        let result = InMemoryCurveStore::from_points([
            YieldCurvePoint::new(date, 126, 8.1, 14.6, 6.0),
            YieldCurvePoint::new(date, 126, 8.2, 14.7, 6.0),
        ]);
        assert!(matches!(result, Err(CurveError::DuplicateTenor { .. })));
    }
}
