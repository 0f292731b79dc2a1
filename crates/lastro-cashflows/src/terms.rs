//! Amortization conventions and indexation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CashflowError;

/// How principal and interest combine into payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InterestTable {
    /// Interest paid as accrued; principal follows [`PrincipalMethod`].
    #[default]
    Integral,
    /// French system: a level payment after grace.
    Price,
}

impl fmt::Display for InterestTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integral => write!(f, "Integral"),
            Self::Price => write!(f, "Price"),
        }
    }
}

impl FromStr for InterestTable {
    type Err = CashflowError;

    /// Accepts `Integral` and `Price` in any case. `None`, `Nenhuma` and the
    /// empty string mean Integral.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INTEGRAL" | "NONE" | "NENHUMA" | "" => Ok(Self::Integral),
            "PRICE" => Ok(Self::Price),
            _ => Err(CashflowError::unsupported("interest table", s)),
        }
    }
}

/// Principal repayment method under the Integral table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrincipalMethod {
    /// Constant amortization over the remaining principal-paying periods.
    #[default]
    Sac,
    /// Whole principal at maturity.
    Bullet,
}

impl fmt::Display for PrincipalMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sac => write!(f, "SAC"),
            Self::Bullet => write!(f, "Bullet"),
        }
    }
}

impl FromStr for PrincipalMethod {
    type Err = CashflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SAC" => Ok(Self::Sac),
            "BULLET" => Ok(Self::Bullet),
            _ => Err(CashflowError::unsupported("principal method", s)),
        }
    }
}

/// Remuneration index of the certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Indexation {
    /// Floating on the interbank deposit rate; valued on the nominal curve.
    Cdi,
    /// Inflation-linked; valued on the real curve with price adjustment.
    #[default]
    Ipca,
    /// Reference rate (TR). No curve is published for it.
    Tr,
}

impl Indexation {
    /// Returns true if quoted prices must be deflated by the price index.
    pub fn is_inflation_linked(&self) -> bool {
        matches!(self, Self::Ipca)
    }
}

impl fmt::Display for Indexation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cdi => write!(f, "CDI"),
            Self::Ipca => write!(f, "IPCA"),
            Self::Tr => write!(f, "TR"),
        }
    }
}

impl FromStr for Indexation {
    type Err = CashflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CDI" => Ok(Self::Cdi),
            "IPCA" => Ok(Self::Ipca),
            "TR" => Ok(Self::Tr),
            _ => Err(CashflowError::unsupported("indexation", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_table_parse() {
        assert_eq!("price".parse::<InterestTable>().unwrap(), InterestTable::Price);
        assert_eq!(" Integral ".parse::<InterestTable>().unwrap(), InterestTable::Integral);
        assert_eq!("Nenhuma".parse::<InterestTable>().unwrap(), InterestTable::Integral);
        assert_eq!("None".parse::<InterestTable>().unwrap(), InterestTable::Integral);
        assert_eq!("".parse::<InterestTable>().unwrap(), InterestTable::Integral);
        assert!("Americana".parse::<InterestTable>().is_err());
    }

    #[test]
    fn test_principal_method_parse() {
        assert_eq!("SAC".parse::<PrincipalMethod>().unwrap(), PrincipalMethod::Sac);
        assert_eq!("bullet".parse::<PrincipalMethod>().unwrap(), PrincipalMethod::Bullet);
        assert!("PRICE".parse::<PrincipalMethod>().is_err());
    }

    #[test]
    fn test_indexation_round_trip() {
        for ix in [Indexation::Cdi, Indexation::Ipca, Indexation::Tr] {
            assert_eq!(ix.to_string().parse::<Indexation>().unwrap(), ix);
        }
        assert!(Indexation::Ipca.is_inflation_linked());
        assert!(!Indexation::Cdi.is_inflation_linked());
        assert!("IGPM".parse::<Indexation>().is_err());
    }
}
