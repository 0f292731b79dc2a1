//! Validated issuance terms for one certificate.

use lastro_core::Date;
use serde::{Deserialize, Serialize};

use crate::error::{CashflowError, CashflowResult};
use crate::terms::{Indexation, InterestTable, PrincipalMethod};

/// Staged capitalization plan: principal is drawn in equal calls every
/// `frequency_months` over `period_months`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capitalization {
    /// Length of the drawdown window in months.
    pub period_months: u32,
    /// Months between calls.
    pub frequency_months: u32,
}

impl Capitalization {
    /// Number of equal calls, `period / frequency`; zero for a zero frequency.
    pub fn steps(&self) -> u32 {
        self.period_months
            .checked_div(self.frequency_months)
            .unwrap_or(0)
    }
}

/// Immutable parameter set for one security.
///
/// Built through [`CashflowInput::builder`], which resolves the term and
/// rejects incomplete terms before any schedule is generated. Deserializing
/// goes through the same builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CashflowTerms")]
pub struct CashflowInput {
    principal: f64,
    issue_date: Date,
    term_months: u32,
    nominal_annual_rate: f64,
    grace_months: u32,
    principal_frequency_months: u32,
    interest_frequency_months: u32,
    interest_table: InterestTable,
    principal_method: PrincipalMethod,
    capitalization: Option<Capitalization>,
    indexation: Indexation,
}

impl CashflowInput {
    /// Starts a builder.
    pub fn builder() -> CashflowInputBuilder {
        CashflowInputBuilder::default()
    }

    /// Total principal.
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Issue date; period 0 of the schedule.
    pub fn issue_date(&self) -> Date {
        self.issue_date
    }

    /// Number of monthly periods `n`.
    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    /// Effective annual rate as a decimal.
    pub fn nominal_annual_rate(&self) -> f64 {
        self.nominal_annual_rate
    }

    /// Months before principal may amortize.
    pub fn grace_months(&self) -> u32 {
        self.grace_months
    }

    /// Months between principal payments.
    pub fn principal_frequency_months(&self) -> u32 {
        self.principal_frequency_months
    }

    /// Months between interest payments.
    pub fn interest_frequency_months(&self) -> u32 {
        self.interest_frequency_months
    }

    /// Interest table.
    pub fn interest_table(&self) -> InterestTable {
        self.interest_table
    }

    /// Principal method.
    pub fn principal_method(&self) -> PrincipalMethod {
        self.principal_method
    }

    /// Staged capitalization plan, if principal is not drawn at once.
    pub fn capitalization(&self) -> Option<Capitalization> {
        self.capitalization
    }

    /// Remuneration index.
    pub fn indexation(&self) -> Indexation {
        self.indexation
    }

    /// Maturity date, `issue_date + term_months`.
    pub fn maturity_date(&self) -> CashflowResult<Date> {
        Ok(self.issue_date.add_months(self.term_months as i32)?)
    }
}

/// Serialized form of [`CashflowInput`], validated by the builder.
#[derive(Debug, Deserialize)]
struct CashflowTerms {
    principal: Option<f64>,
    issue_date: Option<Date>,
    term_months: Option<u32>,
    maturity_date: Option<Date>,
    nominal_annual_rate: Option<f64>,
    #[serde(default)]
    grace_months: u32,
    principal_frequency_months: Option<u32>,
    interest_frequency_months: Option<u32>,
    #[serde(default)]
    interest_table: InterestTable,
    #[serde(default)]
    principal_method: PrincipalMethod,
    capitalization: Option<Capitalization>,
    indexation: Option<Indexation>,
}

impl TryFrom<CashflowTerms> for CashflowInput {
    type Error = CashflowError;

    fn try_from(terms: CashflowTerms) -> CashflowResult<Self> {
        CashflowInputBuilder {
            principal: terms.principal,
            issue_date: terms.issue_date,
            term_months: terms.term_months,
            maturity_date: terms.maturity_date,
            nominal_annual_rate: terms.nominal_annual_rate,
            grace_months: terms.grace_months,
            principal_frequency_months: terms.principal_frequency_months,
            interest_frequency_months: terms.interest_frequency_months,
            interest_table: terms.interest_table,
            principal_method: terms.principal_method,
            capitalization: terms
                .capitalization
                .map(|plan| (plan.period_months, plan.frequency_months)),
            indexation: terms.indexation,
        }
        .build()
    }
}

/// Builder for [`CashflowInput`].
#[derive(Debug, Clone, Default)]
pub struct CashflowInputBuilder {
    principal: Option<f64>,
    issue_date: Option<Date>,
    term_months: Option<u32>,
    maturity_date: Option<Date>,
    nominal_annual_rate: Option<f64>,
    grace_months: u32,
    principal_frequency_months: Option<u32>,
    interest_frequency_months: Option<u32>,
    interest_table: InterestTable,
    principal_method: PrincipalMethod,
    capitalization: Option<(u32, u32)>,
    indexation: Option<Indexation>,
}

impl CashflowInputBuilder {
    /// Sets the principal amount.
    #[must_use]
    pub fn principal(mut self, principal: f64) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Sets the issue date.
    #[must_use]
    pub fn issue_date(mut self, date: Date) -> Self {
        self.issue_date = Some(date);
        self
    }

    /// Sets the number of monthly periods. Takes precedence over maturity.
    #[must_use]
    pub fn term_months(mut self, months: u32) -> Self {
        self.term_months = Some(months);
        self
    }

    /// Sets the maturity date; the term is the whole months from issue.
    #[must_use]
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the effective annual rate as a decimal (0.09 for 9%).
    #[must_use]
    pub fn nominal_annual_rate(mut self, rate: f64) -> Self {
        self.nominal_annual_rate = Some(rate);
        self
    }

    /// Sets the grace period in months (default: 0).
    #[must_use]
    pub fn grace_months(mut self, months: u32) -> Self {
        self.grace_months = months;
        self
    }

    /// Sets the months between principal payments (default: 1).
    #[must_use]
    pub fn principal_frequency_months(mut self, months: u32) -> Self {
        self.principal_frequency_months = Some(months);
        self
    }

    /// Sets the months between interest payments (default: 1).
    #[must_use]
    pub fn interest_frequency_months(mut self, months: u32) -> Self {
        self.interest_frequency_months = Some(months);
        self
    }

    /// Sets the interest table (default: Integral).
    #[must_use]
    pub fn interest_table(mut self, table: InterestTable) -> Self {
        self.interest_table = table;
        self
    }

    /// Sets the principal method (default: SAC).
    #[must_use]
    pub fn principal_method(mut self, method: PrincipalMethod) -> Self {
        self.principal_method = method;
        self
    }

    /// Draws principal in equal calls every `frequency_months` over
    /// `period_months`.
    ///
    /// A zero in either value keeps the single draw at period 0. So does a
    /// period shorter than the frequency, which would mean zero calls.
    #[must_use]
    pub fn capitalization(mut self, period_months: u32, frequency_months: u32) -> Self {
        self.capitalization = Some((period_months, frequency_months));
        self
    }

    /// Sets the remuneration index (default: IPCA).
    #[must_use]
    pub fn indexation(mut self, indexation: Indexation) -> Self {
        self.indexation = Some(indexation);
        self
    }

    /// Validates the terms and builds the input.
    pub fn build(self) -> CashflowResult<CashflowInput> {
        let principal = self
            .principal
            .ok_or_else(|| CashflowError::missing_field("principal"))?;
        if !(principal.is_finite() && principal > 0.0) {
            return Err(CashflowError::invalid_terms(format!(
                "principal must be positive, got {principal}"
            )));
        }

        let issue_date = self
            .issue_date
            .ok_or_else(|| CashflowError::missing_field("issue_date"))?;

        let term_months = match (self.term_months, self.maturity_date) {
            (Some(n), _) => n,
            (None, Some(maturity)) => {
                let months = issue_date.months_between(&maturity);
                u32::try_from(months).map_err(|_| {
                    CashflowError::invalid_terms(format!(
                        "maturity {maturity} precedes issue date {issue_date}"
                    ))
                })?
            }
            (None, None) => {
                return Err(CashflowError::missing_field(
                    "term_months or maturity_date",
                ))
            }
        };
        if term_months == 0 {
            return Err(CashflowError::invalid_terms(
                "resolved term must be at least one month",
            ));
        }

        let nominal_annual_rate = self
            .nominal_annual_rate
            .ok_or_else(|| CashflowError::missing_field("nominal_annual_rate"))?;
        if !(nominal_annual_rate.is_finite() && nominal_annual_rate > -1.0) {
            return Err(CashflowError::invalid_terms(format!(
                "annual rate must be finite and above -100%, got {nominal_annual_rate}"
            )));
        }

        let principal_frequency_months = self.principal_frequency_months.unwrap_or(1);
        let interest_frequency_months = self.interest_frequency_months.unwrap_or(1);
        if principal_frequency_months == 0 || interest_frequency_months == 0 {
            return Err(CashflowError::invalid_terms(
                "payment frequencies must be at least one month",
            ));
        }

        let capitalization = self
            .capitalization
            .filter(|&(period, frequency)| period > 0 && frequency > 0)
            .map(|(period_months, frequency_months)| Capitalization {
                period_months,
                frequency_months,
            })
            .filter(|plan| plan.steps() > 0);

        Ok(CashflowInput {
            principal,
            issue_date,
            term_months,
            nominal_annual_rate,
            grace_months: self.grace_months,
            principal_frequency_months,
            interest_frequency_months,
            interest_table: self.interest_table,
            principal_method: self.principal_method,
            capitalization,
            indexation: self.indexation.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue() -> Date {
        Date::from_ymd(2024, 5, 29).unwrap()
    }

    fn base() -> CashflowInputBuilder {
        CashflowInput::builder()
            .principal(1_000_000.0)
            .issue_date(issue())
            .nominal_annual_rate(0.09)
    }

    #[test]
    fn test_defaults() {
        let input = base().term_months(24).build().unwrap();
        assert_eq!(input.term_months(), 24);
        assert_eq!(input.grace_months(), 0);
        assert_eq!(input.principal_frequency_months(), 1);
        assert_eq!(input.interest_frequency_months(), 1);
        assert_eq!(input.interest_table(), InterestTable::Integral);
        assert_eq!(input.principal_method(), PrincipalMethod::Sac);
        assert_eq!(input.indexation(), Indexation::Ipca);
        assert!(input.capitalization().is_none());
        assert_eq!(
            input.maturity_date().unwrap(),
            Date::from_ymd(2026, 5, 29).unwrap()
        );
    }

    #[test]
    fn test_term_from_maturity() {
        let input = base()
            .maturity_date(Date::from_ymd(2026, 5, 29).unwrap())
            .build()
            .unwrap();
        assert_eq!(input.term_months(), 24);

        // One day short of a whole month drops it
        let input = base()
            .maturity_date(Date::from_ymd(2026, 5, 28).unwrap())
            .build()
            .unwrap();
        assert_eq!(input.term_months(), 23);
    }

    #[test]
    fn test_term_takes_precedence_over_maturity() {
        let input = base()
            .term_months(12)
            .maturity_date(Date::from_ymd(2030, 1, 1).unwrap())
            .build()
            .unwrap();
        assert_eq!(input.term_months(), 12);
    }

    #[test]
    fn test_missing_term_and_maturity() {
        let err = base().build().unwrap_err();
        assert!(matches!(err, CashflowError::MissingField { .. }));
    }

    #[test]
    fn test_non_positive_term() {
        let err = base().term_months(0).build().unwrap_err();
        assert!(matches!(err, CashflowError::InvalidTerms { .. }));

        let err = base()
            .maturity_date(Date::from_ymd(2024, 6, 10).unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, CashflowError::InvalidTerms { .. }));

        let err = base()
            .maturity_date(Date::from_ymd(2023, 1, 1).unwrap())
            .build()
            .unwrap_err();
        assert!(matches!(err, CashflowError::InvalidTerms { .. }));
    }

    #[test]
    fn test_missing_rate() {
        let err = CashflowInput::builder()
            .principal(1000.0)
            .issue_date(issue())
            .term_months(12)
            .build()
            .unwrap_err();
        assert_eq!(err, CashflowError::missing_field("nominal_annual_rate"));
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let err = base()
            .term_months(12)
            .interest_frequency_months(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, CashflowError::InvalidTerms { .. }));
    }

    #[test]
    fn test_capitalization_plan() {
        let input = base().term_months(24).capitalization(6, 2).build().unwrap();
        let plan = input.capitalization().unwrap();
        assert_eq!(plan.steps(), 3);

        // Degenerate plans fall back to a single draw
        let input = base().term_months(24).capitalization(0, 0).build().unwrap();
        assert!(input.capitalization().is_none());
        let input = base().term_months(24).capitalization(1, 3).build().unwrap();
        assert!(input.capitalization().is_none());

        let plan = Capitalization {
            period_months: 6,
            frequency_months: 0,
        };
        assert_eq!(plan.steps(), 0);
    }

    #[test]
    fn test_deserialize_runs_builder_checks() {
        let input = base()
            .term_months(24)
            .grace_months(6)
            .capitalization(6, 2)
            .build()
            .unwrap();
        let json = serde_json::to_string(&input).unwrap();
        let parsed: CashflowInput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, input);

        let json = r#"{
            "principal": 1000000.0,
            "issue_date": "2024-05-29",
            "term_months": 24,
            "nominal_annual_rate": 0.09,
            "interest_frequency_months": 0
        }"#;
        let err = serde_json::from_str::<CashflowInput>(json).unwrap_err();
        assert!(err.to_string().contains("frequencies"));

        let json = r#"{
            "principal": 1000000.0,
            "issue_date": "2024-05-29",
            "term_months": 24,
            "nominal_annual_rate": 0.09,
            "capitalization": {"period_months": 6, "frequency_months": 0}
        }"#;
        let parsed: CashflowInput = serde_json::from_str(json).unwrap();
        assert!(parsed.capitalization().is_none());

        let json = r#"{"principal": 0.0, "issue_date": "2024-05-29", "term_months": 0}"#;
        assert!(serde_json::from_str::<CashflowInput>(json).is_err());
    }
}
