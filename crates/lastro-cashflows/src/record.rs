//! Mapping from the stored certificate row to [`CashflowInput`].
//!
//! The persisted row keeps the registry's formatting: amounts as decimals,
//! the spread in percent, and frequencies either as month counts or as
//! Portuguese period names (`Mensal`, `Semestral`, ...).

use lastro_core::Date;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CashflowError, CashflowResult};
use crate::input::CashflowInput;
use crate::terms::{Indexation, InterestTable, PrincipalMethod};

/// Face value of one unit when the registry does not publish it.
pub const DEFAULT_FACE_VALUE: f64 = 1000.0;

/// A month count as stored: a number, a numeric string, or a period name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MonthsField {
    /// A plain count.
    Months(u32),
    /// Text such as `"3"` or `"Trimestral"`.
    Name(String),
}

impl MonthsField {
    /// Resolves the field to a month count.
    pub fn months(&self) -> CashflowResult<u32> {
        match self {
            Self::Months(n) => Ok(*n),
            Self::Name(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    return Ok(0);
                }
                if let Ok(n) = trimmed.parse::<u32>() {
                    return Ok(n);
                }
                match trimmed.to_lowercase().as_str() {
                    "mensal" => Ok(1),
                    "bimestral" => Ok(2),
                    "trimestral" => Ok(3),
                    "quadrimestral" => Ok(4),
                    "semestral" => Ok(6),
                    "anual" => Ok(12),
                    _ => Err(CashflowError::unsupported("frequency", name.as_str())),
                }
            }
        }
    }
}

/// Months of an optional field; missing and blank resolve to zero.
fn months_or_zero(field: Option<&MonthsField>) -> CashflowResult<u32> {
    field.map_or(Ok(0), MonthsField::months)
}

/// A payment frequency; missing and zero mean monthly.
fn frequency(field: Option<&MonthsField>) -> CashflowResult<u32> {
    months_or_zero(field).map(|n| n.max(1))
}

/// Finds the index named in a free-form remuneration label such as
/// `"IPCA + 7,50%"` or `"100% CDI"`.
fn parse_remuneration(label: &str) -> CashflowResult<Indexation> {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .find_map(|token| token.parse::<Indexation>().ok())
        .ok_or_else(|| CashflowError::unsupported("indexation", label))
}

/// The persisted certificate row, as far as schedule generation needs it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityRecord {
    /// Registry code of the certificate.
    #[serde(default)]
    pub code: Option<String>,
    /// Total amount issued.
    pub issued_amount: Option<Decimal>,
    /// Issue date.
    pub issue_date: Option<Date>,
    /// Term in months.
    #[serde(default)]
    pub term_months: Option<u32>,
    /// Maturity date, used when the term is missing.
    #[serde(default)]
    pub maturity_date: Option<Date>,
    /// Annual rate over the index, in percent (7.5 for 7.5% a.a.).
    pub annual_spread_pct: Option<Decimal>,
    /// Grace months before principal amortizes.
    #[serde(default)]
    pub grace_months: Option<u32>,
    /// Principal payment frequency.
    #[serde(default)]
    pub principal_frequency: Option<MonthsField>,
    /// Interest payment frequency.
    #[serde(default)]
    pub interest_frequency: Option<MonthsField>,
    /// Interest table label.
    #[serde(default)]
    pub interest_table: Option<String>,
    /// Principal method label.
    #[serde(default)]
    pub principal_method: Option<String>,
    /// Length of the staged drawdown.
    #[serde(default)]
    pub capitalization_period: Option<MonthsField>,
    /// Months between staged calls.
    #[serde(default)]
    pub capitalization_frequency: Option<MonthsField>,
    /// Remuneration label, e.g. `"IPCA + 7,50%"`.
    #[serde(default)]
    pub remuneration: Option<String>,
}

impl SecurityRecord {
    /// Maps the row into validated issuance terms.
    pub fn to_input(&self) -> CashflowResult<CashflowInput> {
        let principal = self
            .issued_amount
            .ok_or_else(|| CashflowError::missing_field("issued_amount"))?
            .to_f64()
            .ok_or_else(|| CashflowError::invalid_terms("issued amount out of range"))?;
        let issue_date = self
            .issue_date
            .ok_or_else(|| CashflowError::missing_field("issue_date"))?;
        let rate = self
            .annual_spread_pct
            .ok_or_else(|| CashflowError::missing_field("annual_spread_pct"))?
            .to_f64()
            .ok_or_else(|| CashflowError::invalid_terms("annual spread out of range"))?
            / 100.0;

        let interest_table = match self.interest_table.as_deref() {
            Some(label) => label.parse()?,
            None => InterestTable::Integral,
        };
        let principal_method = match self.principal_method.as_deref() {
            Some(label) if !label.trim().is_empty() => label.parse()?,
            _ => PrincipalMethod::Sac,
        };
        let indexation = match self.remuneration.as_deref() {
            Some(label) if !label.trim().is_empty() => parse_remuneration(label)?,
            _ => Indexation::Ipca,
        };

        let mut builder = CashflowInput::builder()
            .principal(principal)
            .issue_date(issue_date)
            .nominal_annual_rate(rate)
            .grace_months(self.grace_months.unwrap_or(0))
            .principal_frequency_months(frequency(self.principal_frequency.as_ref())?)
            .interest_frequency_months(frequency(self.interest_frequency.as_ref())?)
            .interest_table(interest_table)
            .principal_method(principal_method)
            .indexation(indexation)
            .capitalization(
                months_or_zero(self.capitalization_period.as_ref())?,
                months_or_zero(self.capitalization_frequency.as_ref())?,
            );
        if let Some(n) = self.term_months {
            builder = builder.term_months(n);
        }
        if let Some(maturity) = self.maturity_date {
            builder = builder.maturity_date(maturity);
        }

        builder.build()
    }

    /// Units outstanding at `face` per unit.
    pub fn unit_quantity(&self, face: f64) -> Option<f64> {
        let amount = self.issued_amount?.to_f64()?;
        (face > 0.0).then(|| amount / face)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Capitalization;
    use rust_decimal_macros::dec;

    fn record() -> SecurityRecord {
        SecurityRecord {
            code: Some("24E1234567".to_string()),
            issued_amount: Some(dec!(1000000)),
            issue_date: Some(Date::from_ymd(2024, 5, 29).unwrap()),
            term_months: Some(24),
            annual_spread_pct: Some(dec!(9)),
            remuneration: Some("IPCA + 9,00%".to_string()),
            ..SecurityRecord::default()
        }
    }

    #[test]
    fn test_months_field() {
        assert_eq!(MonthsField::Months(6).months().unwrap(), 6);
        assert_eq!(MonthsField::Name("12".into()).months().unwrap(), 12);
        assert_eq!(MonthsField::Name("Trimestral".into()).months().unwrap(), 3);
        assert_eq!(MonthsField::Name("SEMESTRAL".into()).months().unwrap(), 6);
        assert_eq!(MonthsField::Name(" ".into()).months().unwrap(), 0);
        assert!(MonthsField::Name("Quinzenal".into()).months().is_err());
    }

    #[test]
    fn test_to_input_defaults() {
        let input = record().to_input().unwrap();
        assert_eq!(input.principal(), 1_000_000.0);
        assert_eq!(input.term_months(), 24);
        assert!((input.nominal_annual_rate() - 0.09).abs() < 1e-15);
        assert_eq!(input.principal_frequency_months(), 1);
        assert_eq!(input.interest_frequency_months(), 1);
        assert_eq!(input.interest_table(), InterestTable::Integral);
        assert_eq!(input.principal_method(), PrincipalMethod::Sac);
        assert_eq!(input.indexation(), Indexation::Ipca);
        assert!(input.capitalization().is_none());
    }

    #[test]
    fn test_zero_frequency_means_monthly() {
        let rec = SecurityRecord {
            principal_frequency: Some(MonthsField::Months(0)),
            interest_frequency: Some(MonthsField::Name("Semestral".into())),
            ..record()
        };
        let input = rec.to_input().unwrap();
        assert_eq!(input.principal_frequency_months(), 1);
        assert_eq!(input.interest_frequency_months(), 6);
    }

    #[test]
    fn test_remuneration_labels() {
        assert_eq!(parse_remuneration("100% CDI").unwrap(), Indexation::Cdi);
        assert_eq!(parse_remuneration("CDI + 2,5%").unwrap(), Indexation::Cdi);
        assert_eq!(parse_remuneration("TR").unwrap(), Indexation::Tr);
        assert!(parse_remuneration("IGP-M + 6%").is_err());
    }

    #[test]
    fn test_capitalization_pair() {
        let rec = SecurityRecord {
            capitalization_period: Some(MonthsField::Name("6".into())),
            capitalization_frequency: Some(MonthsField::Months(2)),
            ..record()
        };
        assert_eq!(
            rec.to_input().unwrap().capitalization(),
            Some(Capitalization {
                period_months: 6,
                frequency_months: 2
            })
        );

        let rec = SecurityRecord {
            capitalization_period: Some(MonthsField::Months(0)),
            capitalization_frequency: Some(MonthsField::Months(0)),
            ..record()
        };
        assert!(rec.to_input().unwrap().capitalization().is_none());
    }

    #[test]
    fn test_missing_fields() {
        let rec = SecurityRecord {
            annual_spread_pct: None,
            ..record()
        };
        assert_eq!(
            rec.to_input().unwrap_err(),
            CashflowError::missing_field("annual_spread_pct")
        );

        let rec = SecurityRecord {
            interest_table: Some("Americana".into()),
            ..record()
        };
        assert!(matches!(
            rec.to_input().unwrap_err(),
            CashflowError::Unsupported { .. }
        ));
    }

    #[test]
    fn test_unit_quantity() {
        assert_eq!(record().unit_quantity(DEFAULT_FACE_VALUE), Some(1000.0));
        assert_eq!(record().unit_quantity(0.0), None);
    }

    #[test]
    fn test_deserialize_registry_row() {
        let json = r#"{
            "code": "24E1234567",
            "issued_amount": 1500000.0,
            "issue_date": "2024-05-29",
            "term_months": 36,
            "annual_spread_pct": 7.5,
            "grace_months": 6,
            "principal_frequency": "Trimestral",
            "interest_frequency": 1,
            "interest_table": "Price",
            "remuneration": "IPCA + 7,50%"
        }"#;
        let rec: SecurityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.principal_frequency, Some(MonthsField::Name("Trimestral".into())));

        let input = rec.to_input().unwrap();
        assert_eq!(input.grace_months(), 6);
        assert_eq!(input.principal_frequency_months(), 3);
        assert_eq!(input.interest_table(), InterestTable::Price);
        assert!((input.nominal_annual_rate() - 0.075).abs() < 1e-15);
    }
}
