//! End-to-end valuation of one certificate.
//!
//! The engine builds the schedule, picks the curve series from the
//! indexation, deflates an IPCA price by the index accrued since issue, then
//! chains market yield, market duration, curve NPV at that duration and
//! the sovereign spread. Any undefined step fails the whole valuation.

use lastro_cashflows::{
    generate, CashflowInput, DisplayRow, Indexation, Schedule, SecurityRecord, DEFAULT_FACE_VALUE,
};
use lastro_core::Date;
use lastro_curves::{CurveError, CurveStore, PriceIndexStore, RateSeries};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::ValuationConfig;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::flows::{schedule_flows, Purchase};
use crate::pricing::{npv, npv_vs_curve, CurveTableRow, NpvTableRow};
use crate::spreads::sovereign_spread;
use crate::yields::{current_xirr, XirrTableRow};

/// Curve series a certificate is valued on.
pub fn curve_series(indexation: Indexation) -> AnalyticsResult<RateSeries> {
    match indexation {
        Indexation::Cdi => Ok(RateSeries::Nominal),
        Indexation::Ipca => Ok(RateSeries::Real),
        Indexation::Tr => Err(AnalyticsError::invalid_input(
            "no curve series is published for TR-indexed certificates",
        )),
    }
}

/// Everything computed for one valuation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Reference date of the valuation.
    pub reference_date: Date,
    /// Remuneration index of the certificate.
    pub indexation: Indexation,
    /// Curve series discounted on.
    pub series: RateSeries,
    /// `index(reference) / index(issue)`, for inflation-linked prices.
    pub index_factor: Option<f64>,
    /// Unit price after index deflation.
    pub adjusted_price: Option<f64>,
    /// Market yield of the remaining flows.
    pub xirr: f64,
    /// Present value of the remaining flows at the market yield.
    pub npv_at_xirr: f64,
    /// Curve present value net of the purchase cost.
    pub npv_vs_curve: f64,
    /// Macaulay duration at the market yield, in years.
    pub macaulay_duration_market: f64,
    /// Macaulay duration on the curve, in years.
    pub macaulay_duration_curve: Option<f64>,
    /// Curve rate at the tenor nearest the market duration.
    pub curve_lookup_rate: f64,
    /// `xirr - curve_lookup_rate`.
    pub spread: f64,
    /// The generated schedule.
    pub schedule: Schedule,
    /// XIRR detail.
    pub xirr_table: Vec<XirrTableRow>,
    /// Market NPV detail.
    pub npv_table: Vec<NpvTableRow>,
    /// Curve NPV detail.
    pub curve_table: Vec<CurveTableRow>,
}

/// Values certificates against a curve store and a price index store.
pub struct ValuationEngine<'a> {
    curves: &'a dyn CurveStore,
    index: &'a dyn PriceIndexStore,
    config: ValuationConfig,
}

impl<'a> ValuationEngine<'a> {
    /// Creates an engine with the default configuration.
    pub fn new(curves: &'a dyn CurveStore, index: &'a dyn PriceIndexStore) -> Self {
        Self {
            curves,
            index,
            config: ValuationConfig::default(),
        }
    }

    /// Replaces the configuration after validating it.
    pub fn with_config(mut self, config: ValuationConfig) -> AnalyticsResult<Self> {
        config.validate_or_error()?;
        self.config = config;
        Ok(self)
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Values `input` as of `reference_date`.
    ///
    /// `price` is per unit. Without both `price` and `quantity` the market
    /// yield is taken on the remaining flows alone.
    pub fn analyze(
        &self,
        input: &CashflowInput,
        reference_date: Date,
        price: Option<f64>,
        quantity: Option<f64>,
    ) -> AnalyticsResult<ValuationResult> {
        let schedule = generate(input)?;
        let indexation = input.indexation();
        let series = curve_series(indexation)?;
        log::debug!("valuing {indexation} certificate on the {series} curve as of {reference_date}");

        let (adjusted_price, index_factor) = match price {
            Some(price) if indexation.is_inflation_linked() => {
                let factor = self.index_factor(input.issue_date(), reference_date)?;
                log::debug!("price index factor since {}: {factor:.10}", input.issue_date());
                (Some(price / factor), Some(factor))
            }
            _ => (price, None),
        };
        let purchase = Purchase::from_parts(adjusted_price, quantity);

        let flows = schedule_flows(&schedule);
        let solver = self.config.solver();
        let market_yield = current_xirr(
            &flows,
            reference_date,
            purchase,
            self.config.xirr_initial_guess,
            &solver,
        );
        let xirr = market_yield.rate.require("XIRR").map_err(|err| {
            log::warn!("valuation as of {reference_date} stopped: {err}");
            err
        })?;

        let market = npv(&flows, reference_date, xirr);
        let macaulay_duration_market = market.macaulay_duration.ok_or_else(|| {
            AnalyticsError::undefined("market duration", "no positive cashflows remain")
        })?;

        let curve = self
            .curves
            .load_curve(reference_date)
            .map_err(data_error)?
            .with_rate_floor(self.config.rate_floor);
        let on_curve = npv_vs_curve(
            &flows,
            reference_date,
            &curve,
            series,
            purchase,
            Some(macaulay_duration_market),
            self.config.year_basis(),
        )?;

        let curve_lookup_rate = on_curve.lookup_rate.ok_or_else(|| {
            AnalyticsError::undefined("curve lookup rate", "no tenor matched the market duration")
        })?;
        let spread = sovereign_spread(&market_yield.rate, Some(curve_lookup_rate))?;
        log::debug!(
            "xirr {xirr:.6}, curve lookup {curve_lookup_rate:.6}, spread {spread:.6} as of {reference_date}"
        );

        Ok(ValuationResult {
            reference_date,
            indexation,
            series,
            index_factor,
            adjusted_price,
            xirr,
            npv_at_xirr: market.npv,
            npv_vs_curve: on_curve.npv,
            macaulay_duration_market,
            macaulay_duration_curve: on_curve.macaulay_duration,
            curve_lookup_rate,
            spread,
            schedule,
            xirr_table: market_yield.table,
            npv_table: market.table,
            curve_table: on_curve.table,
        })
    }

    /// Values a stored certificate row.
    ///
    /// A missing quantity is derived from the issued amount at the default
    /// face value.
    pub fn analyze_record(
        &self,
        record: &SecurityRecord,
        reference_date: Date,
        price: Option<f64>,
        quantity: Option<f64>,
    ) -> AnalyticsResult<ValuationResult> {
        let input = record.to_input()?;
        let quantity = quantity.or_else(|| record.unit_quantity(DEFAULT_FACE_VALUE));
        self.analyze(&input, reference_date, price, quantity)
    }

    /// Schedule rows of `result` rounded to the configured display places.
    pub fn display_rows(&self, result: &ValuationResult) -> AnalyticsResult<Vec<DisplayRow>> {
        Ok(result.schedule.display_rows(self.config.display_decimals)?)
    }

    /// `index(reference) / index(issue)`.
    fn index_factor(&self, issue_date: Date, reference_date: Date) -> AnalyticsResult<f64> {
        let at_issue = self
            .index
            .get_index(issue_date)
            .map_err(data_error)?;
        let at_reference = self
            .index
            .get_index(reference_date)
            .map_err(data_error)?;

        let factor = at_reference
            .checked_div(at_issue)
            .and_then(|ratio| ratio.to_f64())
            .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
            .ok_or_else(|| {
                AnalyticsError::invalid_input(format!(
                    "price index {at_reference} / {at_issue} is not a positive ratio"
                ))
            })?;
        Ok(factor)
    }
}

fn data_error(err: CurveError) -> AnalyticsError {
    let err = AnalyticsError::from(err);
    if err.is_data_availability() {
        log::warn!("{err}");
    }
    err
}
