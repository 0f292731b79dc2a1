//! Dated cashflows as the valuation functions consume them.

use lastro_cashflows::Schedule;
use lastro_core::Date;
use serde::{Deserialize, Serialize};

/// A single dated amount; positive is cash to the investor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cashflow {
    /// Payment date.
    pub date: Date,
    /// Signed amount.
    pub amount: f64,
}

impl Cashflow {
    /// Creates a cashflow.
    pub fn new(date: Date, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// A purchase at `price` per unit for `quantity` units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    /// Unit price.
    pub price: f64,
    /// Number of units.
    pub quantity: f64,
}

impl Purchase {
    /// Pairs a price and a quantity when both are known.
    pub fn from_parts(price: Option<f64>, quantity: Option<f64>) -> Option<Self> {
        Some(Self {
            price: price?,
            quantity: quantity?,
        })
    }

    /// Total paid, `price * quantity`.
    pub fn cost(&self) -> f64 {
        self.price * self.quantity
    }
}

/// Payments of every schedule row, in period order.
pub fn schedule_flows(schedule: &Schedule) -> Vec<Cashflow> {
    schedule
        .cashflows()
        .into_iter()
        .map(|(date, amount)| Cashflow::new(date, amount))
        .collect()
}

/// Flows dated on or after `reference`, sorted by date.
pub fn future_flows(flows: &[Cashflow], reference: Date) -> Vec<Cashflow> {
    let mut future: Vec<Cashflow> = flows
        .iter()
        .filter(|cf| cf.date >= reference)
        .copied()
        .collect();
    future.sort_by_key(|cf| cf.date);
    future
}
