//! Rounded schedule rows for presentation.

use lastro_core::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CashflowError, CashflowResult};
use crate::schedule::{Schedule, ScheduleRow};

/// Decimal places used when none are configured.
pub const DEFAULT_DISPLAY_DECIMALS: u32 = 2;

/// Places kept on the monthly rate column.
const RATE_DECIMALS: u32 = 8;

/// A [`ScheduleRow`] with monetary fields as rounded decimals.
///
/// The generator never reads these back; accruals always run on the
/// full-precision rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Period index.
    pub period: u32,
    /// Payment date.
    pub date: Date,
    /// Principal drawn, negative.
    pub capital_call: Decimal,
    /// Monthly effective rate.
    pub period_rate: Decimal,
    /// Opening balance.
    pub opening_balance: Decimal,
    /// Interest accrued this period.
    pub accrued_interest: Decimal,
    /// Interest disbursed.
    pub interest_paid: Decimal,
    /// Principal repaid.
    pub amortization: Decimal,
    /// Net payment.
    pub payment: Decimal,
    /// Closing balance.
    pub closing_balance: Decimal,
}

fn round(value: f64, dp: u32) -> CashflowResult<Decimal> {
    Decimal::try_from(value)
        .map(|d| d.round_dp(dp).normalize())
        .map_err(|_| CashflowError::invalid_terms(format!("{value} has no decimal representation")))
}

impl ScheduleRow {
    /// Rounds the monetary fields to `dp` places.
    pub fn rounded(&self, dp: u32) -> CashflowResult<DisplayRow> {
        Ok(DisplayRow {
            period: self.period,
            date: self.date,
            capital_call: round(self.capital_call, dp)?,
            period_rate: round(self.period_rate, RATE_DECIMALS)?,
            opening_balance: round(self.opening_balance, dp)?,
            accrued_interest: round(self.accrued_interest, dp)?,
            interest_paid: round(self.interest_paid, dp)?,
            amortization: round(self.amortization, dp)?,
            payment: round(self.payment, dp)?,
            closing_balance: round(self.closing_balance, dp)?,
        })
    }
}

impl Schedule {
    /// Every row rounded to `dp` places.
    pub fn display_rows(&self, dp: u32) -> CashflowResult<Vec<DisplayRow>> {
        self.rows.iter().map(|row| row.rounded(dp)).collect()
    }
}
