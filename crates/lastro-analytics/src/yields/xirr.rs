//! XIRR on a 30/360 time basis.

use std::fmt;

use lastro_core::daycounts::{DayCount, Thirty360US};
use lastro_core::Date;
use lastro_math::solvers::{newton_raphson, SolverConfig};
use lastro_math::MathError;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::flows::{future_flows, Cashflow, Purchase};

/// Why a rate could not be determined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UndefinedReason {
    /// Fewer than two cashflows.
    TooFewCashflows {
        /// Number of cashflows supplied.
        count: usize,
    },
    /// Cashflows are all of one sign.
    NoSignChange,
    /// No cashflow is dated on or after the reference date.
    NoFutureCashflows,
    /// The derivative vanished at an iterate.
    ZeroDerivative,
    /// An iterate or residual stopped being finite.
    Diverged,
    /// The iteration cap was reached.
    NoConvergence {
        /// Iterations performed.
        iterations: u32,
    },
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewCashflows { count } => {
                write!(f, "need at least two cashflows, got {count}")
            }
            Self::NoSignChange => write!(f, "cashflows have no sign change"),
            Self::NoFutureCashflows => write!(f, "no cashflows on or after the reference date"),
            Self::ZeroDerivative => write!(f, "zero derivative"),
            Self::Diverged => write!(f, "iteration diverged"),
            Self::NoConvergence { iterations } => {
                write!(f, "no convergence after {iterations} iterations")
            }
        }
    }
}

impl From<&MathError> for UndefinedReason {
    fn from(err: &MathError) -> Self {
        match err {
            MathError::ZeroDerivative { .. } => Self::ZeroDerivative,
            MathError::ConvergenceFailed { iterations, .. } => Self::NoConvergence {
                iterations: *iterations,
            },
            _ => Self::Diverged,
        }
    }
}

/// A solved rate or the reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RateOutcome {
    /// Converged annual rate.
    Solved(f64),
    /// No rate exists or the solver could not find it.
    Undefined(UndefinedReason),
}

impl RateOutcome {
    /// The rate, if solved.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Solved(rate) => Some(*rate),
            Self::Undefined(_) => None,
        }
    }

    /// Returns true if a rate was found.
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved(_))
    }

    /// Converts to a result, naming the rate in the error.
    pub fn require(&self, what: &'static str) -> AnalyticsResult<f64> {
        match self {
            Self::Solved(rate) => Ok(*rate),
            Self::Undefined(reason) => Err(AnalyticsError::undefined(what, reason.to_string())),
        }
    }
}

/// One cashflow of an XIRR calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct XirrTableRow {
    /// Payment date.
    pub date: Date,
    /// Signed amount.
    pub amount: f64,
    /// 30/360 days from the first cashflow.
    pub days_360: i64,
    /// `days_360 / 360`.
    pub t_years: f64,
    /// Present value at the solved rate.
    pub pv: Option<f64>,
}

/// Outcome of an XIRR calculation with its per-cashflow table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XirrResult {
    /// Solved rate.
    pub rate: RateOutcome,
    /// Cashflows enriched with time and present value.
    pub table: Vec<XirrTableRow>,
}

/// Annual rate `r` with `Σ cf_i / (1+r)^{t_i} = 0`, where `t_i` is the 30/360
/// year fraction from the first cashflow.
///
/// Unresolvable inputs are reported as [`RateOutcome::Undefined`], never as
/// an error.
pub fn xirr(flows: &[Cashflow], guess: f64, solver: &SolverConfig) -> XirrResult {
    let Some(first) = flows.first() else {
        return XirrResult {
            rate: RateOutcome::Undefined(UndefinedReason::TooFewCashflows { count: 0 }),
            table: Vec::new(),
        };
    };

    let dc = Thirty360US;
    let days: Vec<i64> = flows.iter().map(|cf| dc.day_count(first.date, cf.date)).collect();
    let times: Vec<f64> = days.iter().map(|&d| d as f64 / 360.0).collect();

    let rate = solve(flows, &times, guess, solver);
    let solved = rate.value();

    let table = flows
        .iter()
        .zip(days.iter().zip(&times))
        .map(|(cf, (&days_360, &t_years))| XirrTableRow {
            date: cf.date,
            amount: cf.amount,
            days_360,
            t_years,
            pv: solved.map(|r| cf.amount / (1.0 + r).powf(t_years)),
        })
        .collect();

    XirrResult { rate, table }
}

fn solve(flows: &[Cashflow], times: &[f64], guess: f64, solver: &SolverConfig) -> RateOutcome {
    if flows.len() < 2 {
        return RateOutcome::Undefined(UndefinedReason::TooFewCashflows { count: flows.len() });
    }
    let has_inflow = flows.iter().any(|cf| cf.amount > 0.0);
    let has_outflow = flows.iter().any(|cf| cf.amount < 0.0);
    if !(has_inflow && has_outflow) {
        return RateOutcome::Undefined(UndefinedReason::NoSignChange);
    }

    let f = |r: f64| {
        flows
            .iter()
            .zip(times)
            .map(|(cf, &t)| cf.amount / (1.0 + r).powf(t))
            .sum::<f64>()
    };
    let df = |r: f64| {
        flows
            .iter()
            .zip(times)
            .map(|(cf, &t)| -t * cf.amount / (1.0 + r).powf(t + 1.0))
            .sum::<f64>()
    };

    match newton_raphson(f, df, guess, solver) {
        Ok(result) => RateOutcome::Solved(result.root),
        Err(err) => {
            log::debug!("xirr did not resolve: {err}");
            RateOutcome::Undefined(UndefinedReason::from(&err))
        }
    }
}

/// XIRR of the flows remaining at `reference`.
///
/// With a purchase, the cost is prepended as an outflow on `reference`.
pub fn current_xirr(
    flows: &[Cashflow],
    reference: Date,
    purchase: Option<Purchase>,
    guess: f64,
    solver: &SolverConfig,
) -> XirrResult {
    let future = future_flows(flows, reference);
    if future.is_empty() {
        return XirrResult {
            rate: RateOutcome::Undefined(UndefinedReason::NoFutureCashflows),
            table: Vec::new(),
        };
    }

    let mut dated = Vec::with_capacity(future.len() + 1);
    if let Some(purchase) = purchase {
        dated.push(Cashflow::new(reference, -purchase.cost()));
    }
    dated.extend(future);

    xirr(&dated, guess, solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_one_year_ten_percent() {
        let flows = [
            Cashflow::new(d(2024, 1, 15), -1000.0),
            Cashflow::new(d(2025, 1, 15), 1100.0),
        ];
        let result = xirr(&flows, 0.15, &SolverConfig::default());

        assert_relative_eq!(result.rate.value().unwrap(), 0.10, epsilon = 1e-6);
        assert_eq!(result.table[1].days_360, 360);
        assert_relative_eq!(result.table[1].t_years, 1.0);
        assert_relative_eq!(result.table[1].pv.unwrap(), 1000.0, epsilon = 1e-4);
    }

    #[test]
    fn test_pv_sums_to_zero_at_solution() {
        let flows = [
            Cashflow::new(d(2024, 5, 29), -1000.0),
            Cashflow::new(d(2024, 11, 29), 60.0),
            Cashflow::new(d(2025, 5, 29), 60.0),
            Cashflow::new(d(2025, 11, 29), 1060.0),
        ];
        let result = xirr(&flows, 0.15, &SolverConfig::default());
        assert!(result.rate.is_solved());

        let total: f64 = result.table.iter().filter_map(|row| row.pv).sum();
        assert_relative_eq!(total, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_undefined_inputs() {
        let solver = SolverConfig::default();

        let result = xirr(&[], 0.15, &solver);
        assert_eq!(
            result.rate,
            RateOutcome::Undefined(UndefinedReason::TooFewCashflows { count: 0 })
        );

        let one = [Cashflow::new(d(2024, 1, 15), -1000.0)];
        assert_eq!(
            xirr(&one, 0.15, &solver).rate,
            RateOutcome::Undefined(UndefinedReason::TooFewCashflows { count: 1 })
        );

        let positive = [
            Cashflow::new(d(2024, 1, 15), 100.0),
            Cashflow::new(d(2025, 1, 15), 100.0),
        ];
        let result = xirr(&positive, 0.15, &solver);
        assert_eq!(result.rate, RateOutcome::Undefined(UndefinedReason::NoSignChange));
        assert!(result.table.iter().all(|row| row.pv.is_none()));
        assert!(result.rate.require("XIRR").is_err());
    }

    #[test]
    fn test_current_xirr_prepends_purchase() {
        let flows = [
            Cashflow::new(d(2024, 1, 15), -1000.0),
            Cashflow::new(d(2025, 1, 15), 50.0),
            Cashflow::new(d(2026, 1, 15), 1050.0),
        ];
        let reference = d(2025, 7, 15);
        let purchase = Purchase {
            price: 1050.0 / 1.05_f64.sqrt(),
            quantity: 1.0,
        };
        let result = current_xirr(&flows, reference, Some(purchase), 0.15, &SolverConfig::default());

        assert_eq!(result.table.len(), 2);
        assert_eq!(result.table[0].date, reference);
        assert_relative_eq!(result.table[0].amount, -purchase.cost());
        assert_eq!(result.table[1].days_360, 180);
        assert_relative_eq!(result.rate.value().unwrap(), 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_flow_on_reference_date_is_kept() {
        let flows = [
            Cashflow::new(d(2025, 1, 15), -950.0),
            Cashflow::new(d(2026, 1, 15), 1045.0),
        ];
        let result = current_xirr(&flows, d(2025, 1, 15), None, 0.15, &SolverConfig::default());
        assert_relative_eq!(result.rate.value().unwrap(), 0.10, epsilon = 1e-9);
    }

    #[test]
    fn test_current_xirr_without_purchase_has_no_outflow() {
        let flows = [
            Cashflow::new(d(2024, 1, 15), -1000.0),
            Cashflow::new(d(2025, 1, 15), 1100.0),
        ];
        let result = current_xirr(&flows, d(2024, 6, 1), None, 0.15, &SolverConfig::default());
        assert_eq!(result.rate, RateOutcome::Undefined(UndefinedReason::TooFewCashflows { count: 1 }));

        let result = current_xirr(&flows, d(2026, 1, 1), None, 0.15, &SolverConfig::default());
        assert_eq!(result.rate, RateOutcome::Undefined(UndefinedReason::NoFutureCashflows));
    }

    proptest! {
        #[test]
        fn prop_recovers_zero_coupon_rate(
            rate in 0.01f64..0.30,
            months in 6i32..60,
            cost in 100.0f64..1_000_000.0,
        ) {
            let start = d(2024, 1, 15);
            let end = start.add_months(months).unwrap();
            let t = f64::from(months) / 12.0;
            let flows = [
                Cashflow::new(start, -cost),
                Cashflow::new(end, cost * (1.0 + rate).powf(t)),
            ];
            let solved = xirr(&flows, 0.15, &SolverConfig::default()).rate.value();
            prop_assert!(solved.is_some());
            prop_assert!((solved.unwrap() - rate).abs() < 1e-7);
        }
    }
}
