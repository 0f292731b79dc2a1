//! Schedule totals and realized return.

use lastro_core::rates::monthly_to_annual_effective;
use lastro_math::solvers::{newton_raphson, SolverConfig};
use serde::{Deserialize, Serialize};

use crate::input::CashflowInput;
use crate::schedule::ScheduleRow;
use crate::terms::{Indexation, InterestTable, PrincipalMethod};

/// Starting point for the monthly IRR of a payment stream.
const MONTHLY_IRR_GUESS: f64 = 0.01;

/// Terms and totals of a generated schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Principal of the terms.
    pub principal: f64,
    /// Number of monthly periods.
    pub periods: u32,
    /// Grace months.
    pub grace_months: u32,
    /// Interest table.
    pub interest_table: InterestTable,
    /// Principal method.
    pub principal_method: PrincipalMethod,
    /// Months between principal payments.
    pub principal_frequency_months: u32,
    /// Months between interest payments.
    pub interest_frequency_months: u32,
    /// Remuneration index.
    pub indexation: Indexation,
    /// Sum of net payments, capital calls included.
    pub total_payments: f64,
    /// Sum of interest disbursed.
    pub total_interest_paid: f64,
    /// Sum of principal repaid.
    pub total_amortization: f64,
    /// Sum of principal drawn.
    pub total_capital_called: f64,
    /// Annual equivalent of the monthly IRR of the payments; `None` when the
    /// stream has no root.
    pub annual_irr: Option<f64>,
}

impl ScheduleSummary {
    pub(crate) fn from_rows(input: &CashflowInput, rows: &[ScheduleRow], monthly_rate: f64) -> Self {
        let payments: Vec<f64> = rows.iter().map(|r| r.payment).collect();
        let annual_irr = monthly_irr(&payments).map(monthly_to_annual_effective);
        if annual_irr.is_none() {
            log::debug!("schedule payments have no monthly IRR (contract rate {monthly_rate})");
        }

        Self {
            principal: input.principal(),
            periods: input.term_months(),
            grace_months: input.grace_months(),
            interest_table: input.interest_table(),
            principal_method: input.principal_method(),
            principal_frequency_months: input.principal_frequency_months(),
            interest_frequency_months: input.interest_frequency_months(),
            indexation: input.indexation(),
            total_payments: payments.iter().sum(),
            total_interest_paid: rows.iter().map(|r| r.interest_paid).sum(),
            total_amortization: rows.iter().map(|r| r.amortization).sum(),
            total_capital_called: rows.iter().map(|r| -r.capital_call).sum(),
            annual_irr,
        }
    }
}

/// IRR of evenly spaced monthly payments, `Σ p_t / (1+r)^t = 0`.
fn monthly_irr(payments: &[f64]) -> Option<f64> {
    let has_inflow = payments.iter().any(|&p| p > 0.0);
    let has_outflow = payments.iter().any(|&p| p < 0.0);
    if payments.len() < 2 || !has_inflow || !has_outflow {
        return None;
    }

    let f = |r: f64| {
        payments
            .iter()
            .zip(0..)
            .map(|(p, t)| p / (1.0 + r).powi(t))
            .sum::<f64>()
    };
    let df = |r: f64| {
        payments
            .iter()
            .zip(0..)
            .map(|(p, t)| -f64::from(t) * p / (1.0 + r).powi(t + 1))
            .sum::<f64>()
    };

    newton_raphson(f, df, MONTHLY_IRR_GUESS, &SolverConfig::default())
        .ok()
        .map(|result| result.root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::generate;
    use approx::assert_relative_eq;
    use lastro_core::Date;

    fn input(table: InterestTable, method: PrincipalMethod) -> CashflowInput {
        CashflowInput::builder()
            .principal(1_000_000.0)
            .issue_date(Date::from_ymd(2024, 5, 29).unwrap())
            .term_months(24)
            .grace_months(3)
            .nominal_annual_rate(0.09)
            .interest_table(table)
            .principal_method(method)
            .indexation(Indexation::Cdi)
            .build()
            .unwrap()
    }

    #[test]
    fn test_totals() {
        let schedule = generate(&input(InterestTable::Integral, PrincipalMethod::Sac)).unwrap();
        let summary = &schedule.summary;

        assert_eq!(summary.periods, 24);
        assert_eq!(summary.grace_months, 3);
        assert_eq!(summary.indexation, Indexation::Cdi);
        assert_relative_eq!(summary.total_capital_called, 1_000_000.0);
        assert_relative_eq!(summary.total_amortization, 1_000_000.0, epsilon = 1e-6);
        assert_relative_eq!(
            summary.total_payments,
            summary.total_interest_paid,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_realized_irr_matches_contract_rate() {
        for (table, method) in [
            (InterestTable::Integral, PrincipalMethod::Sac),
            (InterestTable::Integral, PrincipalMethod::Bullet),
            (InterestTable::Price, PrincipalMethod::Sac),
        ] {
            let summary = generate(&input(table, method)).unwrap().summary;
            assert_relative_eq!(summary.annual_irr.unwrap(), 0.09, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_irr_undefined_without_sign_change() {
        assert_eq!(monthly_irr(&[100.0, 100.0]), None);
        assert_eq!(monthly_irr(&[-100.0]), None);
        assert_relative_eq!(monthly_irr(&[-100.0, 110.0]).unwrap(), 0.1, epsilon = 1e-9);
    }
}
