//! Present value at a flat annual rate on 30/360.

use lastro_core::daycounts::{DayCount, Thirty360US};
use lastro_core::Date;
use serde::{Deserialize, Serialize};

use crate::flows::{future_flows, Cashflow};
use crate::risk::macaulay_duration;

/// One discounted cashflow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NpvTableRow {
    /// Payment date.
    pub date: Date,
    /// Signed amount.
    pub amount: f64,
    /// 30/360 days from the reference date.
    pub days_360: i64,
    /// `days_360 / 360`.
    pub t_years: f64,
    /// `amount / (1 + rate)^t_years`.
    pub pv: f64,
}

/// Present value and duration at a flat rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketValuation {
    /// Rate used for discounting.
    pub rate: f64,
    /// Sum of present values of the flows on or after the reference date.
    pub npv: f64,
    /// Macaulay duration over the positive flows, in years.
    pub macaulay_duration: Option<f64>,
    /// Per-cashflow detail.
    pub table: Vec<NpvTableRow>,
}

/// Discounts every flow dated on or after `reference` at `rate`.
pub fn npv(flows: &[Cashflow], reference: Date, rate: f64) -> MarketValuation {
    let dc = Thirty360US;
    let table: Vec<NpvTableRow> = future_flows(flows, reference)
        .into_iter()
        .map(|cf| {
            let days_360 = dc.day_count(reference, cf.date);
            let t_years = days_360 as f64 / 360.0;
            NpvTableRow {
                date: cf.date,
                amount: cf.amount,
                days_360,
                t_years,
                pv: cf.amount / (1.0 + rate).powf(t_years),
            }
        })
        .collect();

    MarketValuation {
        rate,
        npv: table.iter().map(|row| row.pv).sum(),
        macaulay_duration: macaulay_duration(table.iter().map(|r| (r.amount, r.pv, r.t_years))),
        table,
    }
}
