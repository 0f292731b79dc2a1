//! Period-by-period amortization schedule.
//!
//! The generator is a fold over periods `t = 0..=n`. Each step takes the
//! carried [`AccrualState`] (closing balance plus interest accrued but not
//! yet paid) and returns the period's [`ScheduleRow`] and the next state.

use lastro_core::rates::annual_to_monthly_effective;
use lastro_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::CashflowResult;
use crate::input::CashflowInput;
use crate::summary::ScheduleSummary;
use crate::terms::{InterestTable, PrincipalMethod};

/// One period of the schedule, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Period index, 0 at issue.
    pub period: u32,
    /// Payment date, `issue + period` months.
    pub date: Date,
    /// Principal drawn this period, negative (cash out for the investor).
    pub capital_call: f64,
    /// Monthly effective rate applied this period (0 at period 0).
    pub period_rate: f64,
    /// Balance carried in from the previous period.
    pub opening_balance: f64,
    /// Interest accrued this period on the opening balance.
    pub accrued_interest: f64,
    /// Interest disbursed this period.
    pub interest_paid: f64,
    /// Principal repaid this period.
    pub amortization: f64,
    /// Net cash to the investor: `interest_paid + amortization + capital_call`.
    pub payment: f64,
    /// Balance after calls and amortization.
    pub closing_balance: f64,
}

/// State threaded through the period fold.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AccrualState {
    /// Closing balance of the previous period.
    pub balance: f64,
    /// Interest accrued since the last flush.
    pub unpaid_interest: f64,
}

/// A generated schedule and its summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Rows for periods `0..=n`.
    pub rows: Vec<ScheduleRow>,
    /// Totals and realized return.
    pub summary: ScheduleSummary,
}

impl Schedule {
    /// `(date, payment)` pairs in period order.
    pub fn cashflows(&self) -> Vec<(Date, f64)> {
        self.rows.iter().map(|r| (r.date, r.payment)).collect()
    }
}

/// Everything fixed for the life of the schedule.
#[derive(Debug, Clone)]
struct PeriodPlan {
    periods: u32,
    grace: u32,
    principal_frequency: u32,
    interest_frequency: u32,
    monthly_rate: f64,
    table: InterestTable,
    method: PrincipalMethod,
    capital_calls: Vec<f64>,
    level_payment: Option<f64>,
}

impl PeriodPlan {
    fn new(input: &CashflowInput) -> Self {
        let periods = input.term_months();
        let grace = input.grace_months();
        let monthly_rate = annual_to_monthly_effective(input.nominal_annual_rate());

        let level_payment = match input.interest_table() {
            InterestTable::Price if periods > grace => Some(level_payment(
                input.principal(),
                monthly_rate,
                periods - grace,
            )),
            _ => None,
        };

        Self {
            periods,
            grace,
            principal_frequency: input.principal_frequency_months(),
            interest_frequency: input.interest_frequency_months(),
            monthly_rate,
            table: input.interest_table(),
            method: input.principal_method(),
            capital_calls: capital_calls(input),
            level_payment,
        }
    }

    fn pays_interest(&self, t: u32) -> bool {
        t > 0 && t % self.interest_frequency == 0
    }

    fn pays_principal(&self, t: u32) -> bool {
        t > self.grace && t % self.principal_frequency == 0
    }

    /// Principal-paying periods from `t` through maturity, both included.
    fn remaining_principal_periods(&self, t: u32) -> u32 {
        let scheduled = (t..self.periods).filter(|&s| self.pays_principal(s)).count() as u32;
        scheduled + 1
    }

    /// Runs one period of the fold.
    fn step(&self, state: AccrualState, t: u32, date: Date) -> (ScheduleRow, AccrualState) {
        let call = self.capital_calls[t as usize];
        let opening = state.balance;
        let period_rate = if t > 0 { self.monthly_rate } else { 0.0 };
        let accrued = opening * period_rate;

        let balance = opening + call;
        let unpaid = state.unpaid_interest + accrued;
        let at_maturity = t == self.periods;

        let (interest_paid, amortization) = if at_maturity {
            (unpaid, balance)
        } else {
            match self.table {
                InterestTable::Integral => self.integral_flows(t, balance, unpaid),
                InterestTable::Price => self.price_flows(t, balance, unpaid),
            }
        };
        let amortization = amortization.clamp(0.0, balance.max(0.0));
        let closing = balance - amortization;

        let row = ScheduleRow {
            period: t,
            date,
            capital_call: -call,
            period_rate,
            opening_balance: opening,
            accrued_interest: accrued,
            interest_paid,
            amortization,
            payment: interest_paid + amortization - call,
            closing_balance: closing,
        };
        let next = AccrualState {
            balance: closing,
            unpaid_interest: unpaid - interest_paid,
        };
        (row, next)
    }

    fn integral_flows(&self, t: u32, balance: f64, unpaid: f64) -> (f64, f64) {
        let amortization = if self.pays_principal(t) {
            match self.method {
                PrincipalMethod::Sac => balance / f64::from(self.remaining_principal_periods(t)),
                PrincipalMethod::Bullet => 0.0,
            }
        } else {
            0.0
        };
        let interest = if self.pays_interest(t) { unpaid } else { 0.0 };
        (interest, amortization)
    }

    // During grace interest flushes on interest dates. After grace a
    // principal date flushes everything unpaid into the level payment, and
    // interest dates in between still flush on their own.
    fn price_flows(&self, t: u32, balance: f64, unpaid: f64) -> (f64, f64) {
        match self.level_payment {
            Some(level) if t > self.grace && self.pays_principal(t) => {
                (unpaid, (level - unpaid).max(0.0).min(balance))
            }
            _ if self.pays_interest(t) => (unpaid, 0.0),
            _ => (0.0, 0.0),
        }
    }
}

/// Level payment of a French-system loan over `k` periods at rate `i`.
fn level_payment(principal: f64, i: f64, k: u32) -> f64 {
    if i == 0.0 {
        return principal / f64::from(k);
    }
    let growth = (1.0 + i).powi(k as i32);
    principal * i * growth / (growth - 1.0)
}

/// Principal drawn in each period `0..=n`.
fn capital_calls(input: &CashflowInput) -> Vec<f64> {
    let n = input.term_months() as usize;
    let mut calls = vec![0.0; n + 1];
    match input.capitalization() {
        Some(plan) => {
            let steps = plan.steps();
            let call = input.principal() / f64::from(steps);
            for k in 0..steps {
                let idx = (k * plan.frequency_months) as usize;
                if idx > n {
                    log::debug!("capital call at period {idx} is past the {n}-period term");
                    break;
                }
                calls[idx] += call;
            }
        }
        None => calls[0] = input.principal(),
    }
    calls
}

/// Generates the schedule for `input`.
///
/// Accrued interest for period `t` is the previous closing balance times the
/// monthly rate, so a capital call starts accruing the period after it is
/// drawn. At maturity every remaining balance is repaid and all unpaid
/// interest is disbursed, so the final closing balance is zero.
pub fn generate(input: &CashflowInput) -> CashflowResult<Schedule> {
    let plan = PeriodPlan::new(input);
    let issue = input.issue_date();

    let dates = (0..=plan.periods)
        .map(|t| issue.add_months(t as i32))
        .collect::<Result<Vec<_>, _>>()?;

    let rows: Vec<ScheduleRow> = dates
        .iter()
        .zip(0..)
        .scan(AccrualState::default(), |state, (&date, t)| {
            let (row, next) = plan.step(*state, t, date);
            *state = next;
            Some(row)
        })
        .collect();

    log::debug!(
        "generated {} periods ({} {}, grace {}) from {issue}",
        plan.periods,
        plan.table,
        plan.method,
        plan.grace
    );

    let summary = ScheduleSummary::from_rows(input, &rows, plan.monthly_rate);
    Ok(Schedule { rows, summary })
}
