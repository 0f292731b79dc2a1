//! Present value against the sovereign zero curve on business days/252.

use lastro_core::calendars::{AnbimaCalendar, Calendar};
use lastro_core::Date;
use lastro_curves::{RateSeries, YieldCurve};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::flows::{future_flows, Cashflow, Purchase};
use crate::risk::macaulay_duration;

/// One cashflow discounted on the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveTableRow {
    /// Payment date.
    pub date: Date,
    /// Signed amount.
    pub amount: f64,
    /// ANBIMA business days from the reference date.
    pub business_days: i64,
    /// `business_days / year basis`.
    pub t_years: f64,
    /// Decimal rate applied.
    pub rate: f64,
    /// `amount / (1 + rate)^t_years`.
    pub pv: f64,
}

/// Curve-based present value and duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveValuation {
    /// Series discounted on.
    pub series: RateSeries,
    /// Sum of present values, net of the purchase cost when one is given.
    pub npv: f64,
    /// Fixed rate read at the tenor nearest the duration override.
    pub lookup_rate: Option<f64>,
    /// Macaulay duration over the positive flows, in years.
    pub macaulay_duration: Option<f64>,
    /// Per-cashflow detail.
    pub table: Vec<CurveTableRow>,
}

/// Discounts the flows on or after `reference` against `curve`.
///
/// With `duration_override` (years), every flow is discounted at the
/// published rate of the tenor nearest `round(duration * year_basis)`
/// business days, and that rate is reported as the lookup rate. Without it,
/// each flow gets the curve rate interpolated at its own tenor.
pub fn npv_vs_curve(
    flows: &[Cashflow],
    reference: Date,
    curve: &YieldCurve,
    series: RateSeries,
    purchase: Option<Purchase>,
    duration_override: Option<f64>,
    year_basis: f64,
) -> AnalyticsResult<CurveValuation> {
    if curve.reference_date() != reference {
        return Err(AnalyticsError::invalid_input(format!(
            "curve for {} cannot value flows as of {reference}",
            curve.reference_date()
        )));
    }
    if year_basis.is_nan() || year_basis <= 0.0 {
        return Err(AnalyticsError::invalid_input(format!(
            "year basis must be positive, got {year_basis}"
        )));
    }

    let future = future_flows(flows, reference);
    if future.is_empty() {
        return Ok(CurveValuation {
            series,
            npv: 0.0,
            lookup_rate: None,
            macaulay_duration: None,
            table: Vec::new(),
        });
    }

    let lookup_rate = match duration_override {
        Some(duration) if !duration.is_finite() => {
            return Err(AnalyticsError::invalid_input(format!(
                "duration override must be finite, got {duration}"
            )))
        }
        Some(duration) => {
            let target = (duration * year_basis).round() as i64;
            let point = curve.nearest_point(target, series)?;
            log::debug!(
                "duration {duration:.4}y maps to {target} business days, nearest {series} tenor {}",
                point.business_days
            );
            Some(curve.nearest_tenor_rate(target, series)?)
        }
        None => None,
    };

    let calendar = AnbimaCalendar::global();
    let table = future
        .into_iter()
        .map(|cf| {
            let business_days = calendar.business_days_between(reference, cf.date);
            let t_years = business_days as f64 / year_basis;
            let rate = match lookup_rate {
                Some(rate) => rate,
                None => curve.rate_at_tenor(business_days, series)?,
            };
            Ok(CurveTableRow {
                date: cf.date,
                amount: cf.amount,
                business_days,
                t_years,
                rate,
                pv: cf.amount / (1.0 + rate).powf(t_years),
            })
        })
        .collect::<AnalyticsResult<Vec<_>>>()?;

    let pv_total: f64 = table.iter().map(|row| row.pv).sum();
    let npv = match purchase {
        Some(purchase) => pv_total - purchase.cost(),
        None => pv_total,
    };

    Ok(CurveValuation {
        series,
        npv,
        lookup_rate,
        macaulay_duration: macaulay_duration(table.iter().map(|r| (r.amount, r.pv, r.t_years))),
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lastro_curves::YieldCurvePoint;

    fn reference() -> Date {
        Date::from_ymd(2025, 8, 28).unwrap()
    }

    fn curve() -> YieldCurve {
        YieldCurve::new(
            reference(),
            vec![
                YieldCurvePoint::new(reference(), 126, 5.0, 10.0, 4.76),
                YieldCurvePoint::new(reference(), 252, 6.0, 11.0, 4.72),
                YieldCurvePoint::new(reference(), 504, 6.5, 12.0, 5.16),
            ],
        )
        .unwrap()
    }

    fn flows() -> Vec<Cashflow> {
        vec![
            Cashflow::new(Date::from_ymd(2025, 2, 28).unwrap(), 50.0),
            Cashflow::new(Date::from_ymd(2026, 2, 28).unwrap(), 50.0),
            Cashflow::new(Date::from_ymd(2027, 2, 28).unwrap(), 1050.0),
        ]
    }

    #[test]
    fn test_interpolated_rates_per_flow() {
        let result =
            npv_vs_curve(&flows(), reference(), &curve(), RateSeries::Real, None, None, 252.0)
                .unwrap();

        assert_eq!(result.lookup_rate, None);
        assert_eq!(result.table.len(), 2);
        for row in &result.table {
            let expected = curve().rate_at_tenor(row.business_days, RateSeries::Real).unwrap();
            assert_relative_eq!(row.rate, expected);
            assert_relative_eq!(row.t_years, row.business_days as f64 / 252.0);
            assert_relative_eq!(row.pv, row.amount / (1.0 + row.rate).powf(row.t_years));
        }
        let total: f64 = result.table.iter().map(|r| r.pv).sum();
        assert_relative_eq!(result.npv, total);
        assert!(result.macaulay_duration.unwrap() > 1.0);
    }

    #[test]
    fn test_duration_override_uses_nearest_tenor() {
        let purchase = Purchase {
            price: 1000.0,
            quantity: 1.0,
        };
        // 1.4 years is 353 business days, nearer 252 than 504
        let result = npv_vs_curve(
            &flows(),
            reference(),
            &curve(),
            RateSeries::Nominal,
            Some(purchase),
            Some(1.4),
            252.0,
        )
        .unwrap();

        assert_relative_eq!(result.lookup_rate.unwrap(), 0.11);
        assert!(result.table.iter().all(|row| row.rate == 0.11));
        let total: f64 = result.table.iter().map(|r| r.pv).sum();
        assert_relative_eq!(result.npv, total - 1000.0);
    }

    #[test]
    fn test_blank_rates_never_become_zero() {
        let sparse = YieldCurve::new(
            reference(),
            vec![
                YieldCurvePoint::new(reference(), 126, 5.0, 10.0, 4.76),
                YieldCurvePoint::published(reference(), 252, Some(6.0), None, None),
                YieldCurvePoint::new(reference(), 504, 6.5, 12.0, 5.16),
            ],
        )
        .unwrap();

        // 353 business days: 252 is nearest but has no nominal rate, so 504 is used
        let result = npv_vs_curve(
            &flows(),
            reference(),
            &sparse,
            RateSeries::Nominal,
            None,
            Some(1.4),
            252.0,
        )
        .unwrap();
        assert_relative_eq!(result.lookup_rate.unwrap(), 0.12);

        let real_only = YieldCurve::new(
            reference(),
            vec![YieldCurvePoint::published(reference(), 252, Some(6.0), None, None)],
        )
        .unwrap();
        for duration in [Some(1.4), None] {
            let err = npv_vs_curve(
                &flows(),
                reference(),
                &real_only,
                RateSeries::Nominal,
                None,
                duration,
                252.0,
            )
            .unwrap_err();
            assert!(err.is_data_availability(), "{err}");
        }
    }

    #[test]
    fn test_rejects_mismatched_curve() {
        let err = npv_vs_curve(
            &flows(),
            Date::from_ymd(2025, 8, 29).unwrap(),
            &curve(),
            RateSeries::Real,
            None,
            None,
            252.0,
        )
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidInput(_)));
    }

    #[test]
    fn test_no_future_flows() {
        let past = [Cashflow::new(Date::from_ymd(2024, 1, 1).unwrap(), 100.0)];
        let result =
            npv_vs_curve(&past, reference(), &curve(), RateSeries::Real, None, Some(2.0), 252.0)
                .unwrap();
        assert_eq!(result.npv, 0.0);
        assert_eq!(result.lookup_rate, None);
        assert_eq!(result.macaulay_duration, None);
    }
}
