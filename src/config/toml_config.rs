use crate::core::PolicyProvider;
use crate::domain::model::LendingPolicy;
use crate::utils::error::{LibraryError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub lending: Option<LendingConfig>,
    pub clock: Option<ClockConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LendingConfig {
    pub loan_period_days: Option<u32>,
    pub daily_fine: Option<u64>,
    pub max_active_loans: Option<usize>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Pin "today" instead of reading the system date.
    pub today: Option<NaiveDate>,
}

impl TomlConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(LibraryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| LibraryError::ConfigParseError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unknown vars stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| LibraryError::ConfigParseError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        let lending = validation::validate_required_field("lending", &self.lending)?;

        if let Some(days) = lending.loan_period_days {
            validation::validate_range("lending.loan_period_days", days, 1, 365)?;
        }
        if let Some(max) = lending.max_active_loans {
            validation::validate_positive_number("lending.max_active_loans", max as u64, 1)?;
        }
        if let Some(currency) = &lending.currency {
            validation::validate_non_empty_string("lending.currency", currency)?;
        }

        Ok(())
    }

    pub fn today(&self) -> Option<NaiveDate> {
        self.clock.as_ref().and_then(|c| c.today)
    }

    fn lending(&self) -> LendingConfig {
        self.lending.clone().unwrap_or_default()
    }
}

impl PolicyProvider for TomlConfig {
    fn loan_period_days(&self) -> u32 {
        self.lending()
            .loan_period_days
            .unwrap_or(LendingPolicy::default().loan_period_days)
    }

    fn daily_fine(&self) -> u64 {
        self.lending()
            .daily_fine
            .unwrap_or(LendingPolicy::default().daily_fine)
    }

    fn max_active_loans(&self) -> usize {
        self.lending()
            .max_active_loans
            .unwrap_or(LendingPolicy::default().max_active_loans)
    }

    fn currency(&self) -> &str {
        self.lending
            .as_ref()
            .and_then(|l| l.currency.as_deref())
            .unwrap_or("JPY")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl Validate for LendingPolicy {
    fn validate(&self) -> Result<()> {
        validation::validate_range("loan_period_days", self.loan_period_days, 1, 365)?;
        validation::validate_positive_number("max_active_loans", self.max_active_loans as u64, 1)?;
        validation::validate_non_empty_string("currency", &self.currency)
    }
}
