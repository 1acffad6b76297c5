#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::PolicyProvider;
use crate::domain::model::LendingPolicy;
use crate::utils::error::{LibraryError, Result};
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use toml_config::{ClockConfig, LendingConfig, TomlConfig};

/// Effective settings after merging the config file and command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub policy: LendingPolicy,
    pub today: Option<NaiveDate>,
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            policy: config.lending_policy(),
            today: config.today(),
        })
    }

    /// Render in the same shape the config file is read in.
    pub fn to_toml_string(&self) -> Result<String> {
        let config = TomlConfig {
            lending: Some(LendingConfig {
                loan_period_days: Some(self.policy.loan_period_days),
                daily_fine: Some(self.policy.daily_fine),
                max_active_loans: Some(self.policy.max_active_loans),
                currency: Some(self.policy.currency.clone()),
            }),
            clock: self.today.map(|today| ClockConfig { today: Some(today) }),
        };
        toml::to_string_pretty(&config).map_err(|e| LibraryError::ConfigParseError {
            field: "toml_rendering".to_string(),
            message: e.to_string(),
        })
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        self.policy.validate()
    }
}
