//! Application configuration loading and validation.
//!
//! [`Config`] selects the exchange adapter and carries its settings plus the
//! logging setup. API credentials are never read from the file; they come
//! from `APICLIENT_ACCOUNT_ID`, `APICLIENT_API_KEY` and
//! `APICLIENT_API_SECRET`.
//!
//! # Example
//!
//! ```no_run
//! use apiclient::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::adapter::outbound::paper::PaperConfig;
use crate::error::{ConfigError, Result};
use crate::port::outbound::exchange::Credentials;

pub const ENV_ACCOUNT_ID: &str = "APICLIENT_ACCOUNT_ID";
pub const ENV_API_KEY: &str = "APICLIENT_API_KEY";
pub const ENV_API_SECRET: &str = "APICLIENT_API_SECRET";

/// Supported exchanges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    /// In-process simulated venue.
    #[default]
    Paper,
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paper => write!(f, "paper"),
        }
    }
}

/// Exchange-specific configuration variant, selected by the `type` field
/// of the `[exchange_config]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExchangeSpecificConfig {
    Paper(PaperConfig),
}

impl ExchangeSpecificConfig {
    #[must_use]
    pub const fn exchange(&self) -> Exchange {
        match self {
            Self::Paper(_) => Exchange::Paper,
        }
    }
}

impl Default for ExchangeSpecificConfig {
    fn default() -> Self {
        Self::Paper(PaperConfig::default())
    }
}

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Target exchange. Defaults to the paper venue.
    #[serde(default)]
    pub exchange: Exchange,

    /// Settings for the selected exchange.
    #[serde(default, alias = "paper")]
    pub exchange_config: ExchangeSpecificConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Filled from the environment, never from the file.
    #[serde(skip)]
    pub credentials: Credentials,
}

fn env_or_empty(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

impl Config {
    /// Parse configuration from TOML content and read credentials from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.credentials = Credentials::new(
            env_or_empty(ENV_ACCOUNT_ID),
            env_or_empty(ENV_API_KEY),
            env_or_empty(ENV_API_SECRET),
        );
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.exchange_config.exchange() != self.exchange {
            return Err(ConfigError::InvalidValue {
                field: "exchange_config.type",
                reason: format!(
                    "{} settings given for exchange {}",
                    self.exchange_config.exchange(),
                    self.exchange
                ),
            }
            .into());
        }
        self.logging.validate()?;
        match &self.exchange_config {
            ExchangeSpecificConfig::Paper(paper) => paper.validate()?,
        }
        Ok(())
    }

    /// Paper venue settings, if that venue is selected.
    #[must_use]
    pub fn paper_config(&self) -> Option<&PaperConfig> {
        match &self.exchange_config {
            ExchangeSpecificConfig::Paper(config) => Some(config),
        }
    }

    /// Install the tracing subscriber described by `[logging]`.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
