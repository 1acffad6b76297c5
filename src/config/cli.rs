use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "library-ledger")]
#[command(about = "Interactive library lending tracker")]
pub struct CliConfig {
    /// Optional TOML file with a [lending] section
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Days between borrow date and due date
    #[arg(long)]
    pub loan_period_days: Option<u32>,

    /// Fine per overdue day
    #[arg(long)]
    pub daily_fine: Option<u64>,

    /// Maximum unreturned loans per member
    #[arg(long)]
    pub max_loans: Option<usize>,

    #[arg(long)]
    pub currency: Option<String>,

    /// Pin today's date (YYYY-MM-DD) instead of using the system clock
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Config file first, then command-line overrides on top.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path.display());
                Settings::from_toml(&TomlConfig::from_file(path)?)?
            }
            None => Settings::default(),
        };

        if let Some(days) = self.loan_period_days {
            settings.policy.loan_period_days = days;
        }
        if let Some(fine) = self.daily_fine {
            settings.policy.daily_fine = fine;
        }
        if let Some(max) = self.max_loans {
            settings.policy.max_active_loans = max;
        }
        if let Some(currency) = &self.currency {
            settings.policy.currency = currency.clone();
        }
        if self.today.is_some() {
            settings.today = self.today;
        }

        settings.validate()?;
        Ok(settings)
    }
}
