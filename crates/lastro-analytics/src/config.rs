//! Valuation settings.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lastro_math::solvers::SolverConfig;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// One or more fields failed validation.
    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),

    /// The configuration text could not be parsed.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Numerical settings shared by every valuation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Newton starting point for XIRR.
    #[serde(default = "default_xirr_initial_guess")]
    pub xirr_initial_guess: f64,

    /// Convergence threshold on both the residual and the step.
    #[serde(default = "default_solver_tolerance")]
    pub solver_tolerance: f64,

    /// Newton iteration cap.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Business days in a year for curve discounting.
    #[serde(default = "default_business_days_per_year")]
    pub business_days_per_year: u32,

    /// Floor applied to non-positive curve rates before taking logs.
    #[serde(default = "default_rate_floor")]
    pub rate_floor: f64,

    /// Decimal places of display rows.
    #[serde(default = "default_display_decimals")]
    pub display_decimals: u32,
}

fn default_xirr_initial_guess() -> f64 {
    0.15
}

fn default_solver_tolerance() -> f64 {
    1e-8
}

fn default_max_iterations() -> u32 {
    100
}

fn default_business_days_per_year() -> u32 {
    252
}

fn default_rate_floor() -> f64 {
    1e-12
}

fn default_display_decimals() -> u32 {
    2
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            xirr_initial_guess: default_xirr_initial_guess(),
            solver_tolerance: default_solver_tolerance(),
            max_iterations: default_max_iterations(),
            business_days_per_year: default_business_days_per_year(),
            rate_floor: default_rate_floor(),
            display_decimals: default_display_decimals(),
        }
    }
}

impl ValuationConfig {
    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Solver settings derived from this configuration.
    pub fn solver(&self) -> SolverConfig {
        SolverConfig::new(self.solver_tolerance, self.max_iterations)
    }

    /// Business days per year as a float.
    pub fn year_basis(&self) -> f64 {
        f64::from(self.business_days_per_year)
    }

    /// Checks every field and returns all violations.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !self.xirr_initial_guess.is_finite() || self.xirr_initial_guess <= -1.0 {
            errors.push(ValidationError::with_rule(
                "xirr_initial_guess",
                "Initial guess must be finite and above -100%",
                "valid_guess",
            ));
        }

        if !(self.solver_tolerance > 0.0 && self.solver_tolerance <= 1e-4) {
            errors.push(ValidationError::with_rule(
                "solver_tolerance",
                "Solver tolerance must be between 0 and 1e-4",
                "valid_tolerance",
            ));
        }

        if self.max_iterations == 0 || self.max_iterations > 10000 {
            errors.push(ValidationError::with_rule(
                "max_iterations",
                "Max iterations must be between 1 and 10000",
                "valid_iterations",
            ));
        }

        if self.business_days_per_year == 0 || self.business_days_per_year > 366 {
            errors.push(ValidationError::with_rule(
                "business_days_per_year",
                "Business days per year must be between 1 and 366",
                "valid_year_basis",
            ));
        }

        if !(self.rate_floor > 0.0 && self.rate_floor < 1.0) {
            errors.push(ValidationError::new(
                "rate_floor",
                "Rate floor must be positive and below 1",
            ));
        }

        if self.display_decimals > 12 {
            errors.push(ValidationError::new(
                "display_decimals",
                "Display decimals cannot exceed 12",
            ));
        }

        errors
    }

    /// Returns true if the configuration is valid.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error listing every violation.
    pub fn validate_or_error(&self) -> Result<(), ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}
