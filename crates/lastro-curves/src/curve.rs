//! ANBIMA zero curve points and log-linear rate interpolation.

use lastro_core::calendars::{AnbimaCalendar, Calendar};
use lastro_core::Date;
use lastro_math::interpolation::{Interpolator, LogLinearInterpolator};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CurveError, CurveResult};

/// Floor applied to non-positive published rates before taking logs.
pub const DEFAULT_RATE_FLOOR: f64 = 1e-12;

/// The three rate series published on each curve point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateSeries {
    /// Real (inflation-linked) zero rate.
    Real,
    /// Nominal (fixed-rate) zero rate.
    Nominal,
    /// Breakeven inflation implied by nominal and real rates.
    ImpliedInflation,
}

impl RateSeries {
    /// All series, in publication order.
    pub const ALL: [RateSeries; 3] = [Self::Real, Self::Nominal, Self::ImpliedInflation];
}

impl fmt::Display for RateSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Real => "real",
            Self::Nominal => "nominal",
            Self::ImpliedInflation => "implied_inflation",
        };
        write!(f, "{name}")
    }
}

/// One published vertex of the sovereign zero curve.
///
/// Rates are kept as published, in percent per year on a BUS/252 basis.
/// A series left blank at a vertex is `None`. A point is uniquely keyed by
/// `(reference_date, business_days)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldCurvePoint {
    /// Date the curve was published for.
    pub reference_date: Date,
    /// Tenor in ANBIMA business days.
    pub business_days: u32,
    /// Real rate, percent.
    pub real_rate: Option<f64>,
    /// Nominal rate, percent.
    pub nominal_rate: Option<f64>,
    /// Implied inflation, percent.
    pub implied_inflation: Option<f64>,
}

impl YieldCurvePoint {
    /// Creates a curve point with all three series published.
    pub fn new(
        reference_date: Date,
        business_days: u32,
        real_rate: f64,
        nominal_rate: f64,
        implied_inflation: f64,
    ) -> Self {
        Self::published(
            reference_date,
            business_days,
            Some(real_rate),
            Some(nominal_rate),
            Some(implied_inflation),
        )
    }

    /// Creates a curve point where any series may be missing.
    pub fn published(
        reference_date: Date,
        business_days: u32,
        real_rate: Option<f64>,
        nominal_rate: Option<f64>,
        implied_inflation: Option<f64>,
    ) -> Self {
        Self {
            reference_date,
            business_days,
            real_rate,
            nominal_rate,
            implied_inflation,
        }
    }

    /// Returns the published rate for a series in percent, if any.
    pub fn rate_pct(&self, series: RateSeries) -> Option<f64> {
        match series {
            RateSeries::Real => self.real_rate,
            RateSeries::Nominal => self.nominal_rate,
            RateSeries::ImpliedInflation => self.implied_inflation,
        }
    }
}

/// Interpolated rates for all three series at one tenor, as decimals.
///
/// A series with no published value anywhere on the curve is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedRates {
    /// Tenor the rates were interpolated at, in business days.
    pub business_days: i64,
    /// Real rate.
    pub real: Option<f64>,
    /// Nominal rate.
    pub nominal: Option<f64>,
    /// Implied inflation.
    pub implied_inflation: Option<f64>,
}

impl InterpolatedRates {
    /// Returns the rate for a series.
    pub fn get(&self, series: RateSeries) -> Option<f64> {
        match series {
            RateSeries::Real => self.real,
            RateSeries::Nominal => self.nominal,
            RateSeries::ImpliedInflation => self.implied_inflation,
        }
    }
}

/// The zero curve published for one reference date.
///
/// Points are sorted by tenor and never empty. Lookups return decimal rates
/// (a published 10.5 becomes 0.105).
#[derive(Debug, Clone)]
pub struct YieldCurve {
    reference_date: Date,
    points: Vec<YieldCurvePoint>,
    rate_floor: f64,
}

impl YieldCurve {
    /// Builds a curve from the points of a single reference date.
    ///
    /// # Errors
    ///
    /// - [`CurveError::EmptyCurve`] if `points` is empty
    /// - [`CurveError::ReferenceDateMismatch`] if a point has another date
    /// - [`CurveError::DuplicateTenor`] if two points share a tenor
    pub fn new(reference_date: Date, mut points: Vec<YieldCurvePoint>) -> CurveResult<Self> {
        if points.is_empty() {
            return Err(CurveError::EmptyCurve { reference_date });
        }
        if let Some(other) = points.iter().find(|p| p.reference_date != reference_date) {
            return Err(CurveError::ReferenceDateMismatch {
                expected: reference_date,
                got: other.reference_date,
            });
        }

        points.sort_by_key(|p| p.business_days);
        if let Some(pair) = points
            .windows(2)
            .find(|w| w[0].business_days == w[1].business_days)
        {
            return Err(CurveError::DuplicateTenor {
                reference_date,
                business_days: pair[0].business_days,
            });
        }

        Ok(Self {
            reference_date,
            points,
            rate_floor: DEFAULT_RATE_FLOOR,
        })
    }

    /// Sets the floor applied to non-positive rates before interpolation.
    #[must_use]
    pub fn with_rate_floor(mut self, floor: f64) -> Self {
        self.rate_floor = floor;
        self
    }

    /// Returns the reference date.
    pub fn reference_date(&self) -> Date {
        self.reference_date
    }

    /// Returns the points sorted by tenor.
    pub fn points(&self) -> &[YieldCurvePoint] {
        &self.points
    }

    /// Business-day tenor of `target` from the reference date on the ANBIMA
    /// calendar.
    pub fn tenor_of(&self, target: Date) -> i64 {
        AnbimaCalendar::global().business_days_between(self.reference_date, target)
    }

    fn missing_series(&self, series: RateSeries) -> CurveError {
        CurveError::MissingSeries {
            reference_date: self.reference_date,
            series,
        }
    }

    /// Interpolates one series at a business-day tenor.
    ///
    /// Log-linear in the rate, extrapolating past either end with the edge
    /// segment's slope. Vertices where the series is blank are skipped.
    ///
    /// # Errors
    ///
    /// [`CurveError::MissingSeries`] if no vertex publishes `series`.
    pub fn rate_at_tenor(&self, business_days: i64, series: RateSeries) -> CurveResult<f64> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = self
            .points
            .iter()
            .filter_map(|p| {
                let rate = p.rate_pct(series)?;
                let floored = if rate <= 0.0 { self.rate_floor } else { rate };
                Some((f64::from(p.business_days), floored))
            })
            .unzip();
        if xs.is_empty() {
            return Err(self.missing_series(series));
        }

        let interpolator = LogLinearInterpolator::new(xs, ys)?.with_extrapolation();
        let pct = interpolator.interpolate(business_days as f64)?;
        Ok(pct / 100.0)
    }

    /// Interpolates all three series for a cashflow dated `target`.
    pub fn interpolate(&self, target: Date) -> CurveResult<InterpolatedRates> {
        let business_days = self.tenor_of(target);
        let series_rate = |series| match self.rate_at_tenor(business_days, series) {
            Ok(rate) => Ok(Some(rate)),
            Err(CurveError::MissingSeries { .. }) => Ok(None),
            Err(err) => Err(err),
        };
        Ok(InterpolatedRates {
            business_days,
            real: series_rate(RateSeries::Real)?,
            nominal: series_rate(RateSeries::Nominal)?,
            implied_inflation: series_rate(RateSeries::ImpliedInflation)?,
        })
    }

    /// Returns the point publishing `series` whose tenor is closest to
    /// `business_days`.
    ///
    /// Ties go to the shorter tenor.
    ///
    /// # Errors
    ///
    /// [`CurveError::MissingSeries`] if no vertex publishes `series`.
    pub fn nearest_point(
        &self,
        business_days: i64,
        series: RateSeries,
    ) -> CurveResult<&YieldCurvePoint> {
        self.points
            .iter()
            .filter(|p| p.rate_pct(series).is_some())
            .min_by_key(|p| (i64::from(p.business_days) - business_days).abs())
            .ok_or_else(|| self.missing_series(series))
    }

    /// Published rate of the nearest tenor publishing `series`, as a decimal.
    pub fn nearest_tenor_rate(&self, business_days: i64, series: RateSeries) -> CurveResult<f64> {
        self.points
            .iter()
            .filter_map(|p| Some((p.business_days, p.rate_pct(series)?)))
            .min_by_key(|(bd, _)| (i64::from(*bd) - business_days).abs())
            .map(|(_, pct)| pct / 100.0)
            .ok_or_else(|| self.missing_series(series))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn reference() -> Date {
        Date::from_ymd(2025, 8, 28).unwrap()
    }

    fn point(bd: u32, real: f64, nominal: f64) -> YieldCurvePoint {
        YieldCurvePoint::new(reference(), bd, real, nominal, nominal - real)
    }

    fn sample_curve() -> YieldCurve {
        YieldCurve::new(
            reference(),
            vec![
                point(252, 7.60, 14.10),
                point(126, 8.10, 14.60),
                point(504, 7.30, 13.50),
                point(1008, 7.10, 13.20),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_points_are_sorted() {
        let curve = sample_curve();
        let tenors: Vec<u32> = curve.points().iter().map(|p| p.business_days).collect();
        assert_eq!(tenors, vec![126, 252, 504, 1008]);
    }

    #[test]
    fn test_empty_curve_rejected() {
        let err = YieldCurve::new(reference(), vec![]).unwrap_err();
        assert_eq!(
            err,
            CurveError::EmptyCurve {
                reference_date: reference()
            }
        );
    }

    #[test]
    fn test_duplicate_tenor_rejected() {
        let err = YieldCurve::new(reference(), vec![point(252, 7.0, 14.0), point(252, 7.1, 14.1)])
            .unwrap_err();
        assert!(matches!(err, CurveError::DuplicateTenor { business_days: 252, .. }));
    }

    #[test]
    fn test_mixed_reference_dates_rejected() {
        let mut stray = point(252, 7.0, 14.0);
        stray.reference_date = Date::from_ymd(2025, 8, 27).unwrap();
        let err = YieldCurve::new(reference(), vec![point(126, 7.0, 14.0), stray]).unwrap_err();
        assert!(matches!(err, CurveError::ReferenceDateMismatch { .. }));
    }

    #[test]
    fn test_exact_tenor_returns_point_rate() {
        let curve = sample_curve();
        for p in curve.points() {
            let bd = i64::from(p.business_days);
            assert_relative_eq!(
                curve.rate_at_tenor(bd, RateSeries::Real).unwrap(),
                p.real_rate.unwrap() / 100.0,
                epsilon = 1e-14
            );
            assert_relative_eq!(
                curve.rate_at_tenor(bd, RateSeries::Nominal).unwrap(),
                p.nominal_rate.unwrap() / 100.0,
                epsilon = 1e-14
            );
        }
    }

    #[test]
    fn test_midpoint_geometric_mean() {
        let curve = YieldCurve::new(
            reference(),
            vec![point(126, 5.0, 5.0), point(252, 6.0, 6.0)],
        )
        .unwrap();

        let rate = curve.rate_at_tenor(189, RateSeries::Nominal).unwrap();
        let expected = ((0.05_f64.ln() + 0.06_f64.ln()) / 2.0).exp();
        assert_relative_eq!(rate, expected, epsilon = 1e-14);
        assert!(rate > 0.05 && rate < 0.06);
    }

    #[test]
    fn test_extrapolates_beyond_last_tenor() {
        let curve = sample_curve();
        let last = curve.rate_at_tenor(1008, RateSeries::Nominal).unwrap();
        let beyond = curve.rate_at_tenor(2016, RateSeries::Nominal).unwrap();
        // Nominal falls from 504 to 1008, so it keeps falling
        assert!(beyond < last);
        assert!(beyond > 0.0);
    }

    #[test]
    fn test_non_positive_rates_are_floored() {
        let curve = YieldCurve::new(
            reference(),
            vec![point(126, 0.0, 10.0), point(252, -0.5, 11.0)],
        )
        .unwrap();
        let rate = curve.rate_at_tenor(200, RateSeries::Real).unwrap();
        assert!(rate > 0.0);
        assert!(rate < 1e-12);
    }

    #[test]
    fn test_single_point_curve_is_flat() {
        let curve = YieldCurve::new(reference(), vec![point(252, 7.5, 14.0)]).unwrap();
        assert_relative_eq!(
            curve.rate_at_tenor(10, RateSeries::Real).unwrap(),
            0.075,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            curve.rate_at_tenor(5000, RateSeries::Real).unwrap(),
            0.075,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_interpolate_by_date_uses_anbima_tenor() {
        let curve = sample_curve();
        // 2025-08-28 + 1 calendar year
        let target = Date::from_ymd(2026, 8, 28).unwrap();
        let rates = curve.interpolate(target).unwrap();
        assert_eq!(rates.business_days, curve.tenor_of(target));
        assert!(rates.business_days > 240 && rates.business_days < 260);
        assert_relative_eq!(
            rates.get(RateSeries::Real).unwrap(),
            curve.rate_at_tenor(rates.business_days, RateSeries::Real).unwrap()
        );
    }

    #[test]
    fn test_nearest_tenor() {
        let curve = sample_curve();
        assert_relative_eq!(curve.nearest_tenor_rate(300, RateSeries::Real).unwrap(), 0.076);
        assert_relative_eq!(curve.nearest_tenor_rate(400, RateSeries::Real).unwrap(), 0.073);
        assert_relative_eq!(curve.nearest_tenor_rate(0, RateSeries::Nominal).unwrap(), 0.146);
        assert_relative_eq!(
            curve.nearest_tenor_rate(5000, RateSeries::Nominal).unwrap(),
            0.132
        );
        // 189 is equidistant from 126 and 252
        let point = curve.nearest_point(189, RateSeries::Nominal).unwrap();
        assert_eq!(point.business_days, 126);
    }

    fn blank_nominal_curve() -> YieldCurve {
        YieldCurve::new(
            reference(),
            vec![
                YieldCurvePoint::published(reference(), 126, Some(7.45), None, None),
                YieldCurvePoint::published(reference(), 252, Some(7.60), Some(14.10), None),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_blank_vertices_are_skipped() {
        let curve = blank_nominal_curve();

        let point = curve.nearest_point(126, RateSeries::Nominal).unwrap();
        assert_eq!(point.business_days, 252);
        assert_relative_eq!(curve.nearest_tenor_rate(126, RateSeries::Nominal).unwrap(), 0.141);
        assert_relative_eq!(curve.nearest_tenor_rate(126, RateSeries::Real).unwrap(), 0.0745);

        // The one published nominal vertex makes the series flat
        assert_relative_eq!(
            curve.rate_at_tenor(126, RateSeries::Nominal).unwrap(),
            0.141,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_unpublished_series_is_missing_data() {
        let curve = blank_nominal_curve();

        let err = curve.rate_at_tenor(126, RateSeries::ImpliedInflation).unwrap_err();
        assert_eq!(
            err,
            CurveError::MissingSeries {
                reference_date: reference(),
                series: RateSeries::ImpliedInflation,
            }
        );
        assert!(err.is_missing_data());
        assert!(curve.nearest_point(126, RateSeries::ImpliedInflation).is_err());
        assert!(curve.nearest_tenor_rate(126, RateSeries::ImpliedInflation).is_err());

        let rates = curve.interpolate(Date::from_ymd(2026, 2, 27).unwrap()).unwrap();
        assert!(rates.real.is_some());
        assert!(rates.nominal.is_some());
        assert_eq!(rates.implied_inflation, None);
    }

    fn arb_vertices() -> impl Strategy<Value = Vec<(u32, f64)>> {
        prop::collection::vec((1u32..300, 0.5f64..20.0), 1..8).prop_map(|steps| {
            steps
                .into_iter()
                .scan(0u32, |tenor, (gap, rate)| {
                    *tenor += gap;
                    Some((*tenor, rate))
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_stored_tenor_returns_published_rate(vertices in arb_vertices()) {
            let points = vertices
                .iter()
                .map(|&(bd, rate)| point(bd, rate / 2.0, rate))
                .collect();
            let curve = YieldCurve::new(reference(), points).unwrap();

            for &(bd, rate) in &vertices {
                let got = curve.rate_at_tenor(i64::from(bd), RateSeries::Nominal).unwrap();
                prop_assert!((got - rate / 100.0).abs() < 1e-12 * rate.max(1.0));
                let nearest = curve.nearest_point(i64::from(bd), RateSeries::Nominal).unwrap();
                prop_assert_eq!(nearest.business_days, bd);
            }
        }

        #[test]
        fn prop_interpolated_rate_stays_within_neighbours(
            vertices in arb_vertices(),
            frac in 0.0f64..1.0,
        ) {
            prop_assume!(vertices.len() >= 2);
            let points = vertices
                .iter()
                .map(|&(bd, rate)| point(bd, rate / 2.0, rate))
                .collect();
            let curve = YieldCurve::new(reference(), points).unwrap();

            let (lo_bd, lo) = vertices[0];
            let (hi_bd, hi) = vertices[1];
            let target = f64::from(lo_bd) + frac * f64::from(hi_bd - lo_bd);
            let got = curve.rate_at_tenor(target.round() as i64, RateSeries::Nominal).unwrap();
            let (min, max) = (lo.min(hi) / 100.0, lo.max(hi) / 100.0);
            prop_assert!(got >= min - 1e-12 && got <= max + 1e-12);
        }
    }
}
