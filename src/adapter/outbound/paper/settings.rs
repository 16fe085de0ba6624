//! Paper venue configuration.

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::domain::TradingPair;
use crate::error::ConfigError;

/// One listed pair and the house liquidity seeded around it.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperMarketConfig {
    /// Pair symbol, `<QUOTE>_<BASE>` in uppercase.
    pub symbol: String,
    /// Price increment; sets the reported price decimals.
    pub tick_size: Decimal,
    /// Quantity increment; sets the reported amount decimals.
    pub step_size: Decimal,
    /// Price the seeded book and history center on.
    pub last_price: Decimal,
    /// House levels seeded per side.
    #[serde(default = "default_seed_levels")]
    pub seed_levels: usize,
    /// Distance between seeded levels. Defaults to the tick size.
    #[serde(default)]
    pub seed_spacing: Option<Decimal>,
    /// Quantity of each seeded level and of each seeded print.
    #[serde(default = "default_seed_quantity")]
    pub seed_quantity: Decimal,
    /// Minutes of one-print-per-minute history seeded before startup.
    #[serde(default = "default_history_minutes")]
    pub history_minutes: usize,
}

const fn default_seed_levels() -> usize {
    10
}

const fn default_seed_quantity() -> Decimal {
    Decimal::ONE
}

const fn default_history_minutes() -> usize {
    120
}

impl PaperMarketConfig {
    pub fn new(symbol: impl Into<String>, tick_size: Decimal, step_size: Decimal, last_price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            tick_size,
            step_size,
            last_price,
            seed_levels: default_seed_levels(),
            seed_spacing: None,
            seed_quantity: default_seed_quantity(),
            history_minutes: default_history_minutes(),
        }
    }

    /// Spacing between seeded levels.
    #[must_use]
    pub fn spacing(&self) -> Decimal {
        self.seed_spacing.unwrap_or(self.tick_size)
    }

    /// The parsed pair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the symbol is malformed.
    pub fn pair(&self) -> Result<TradingPair, ConfigError> {
        self.symbol
            .parse()
            .map_err(|e: crate::domain::error::DomainError| ConfigError::InvalidValue {
                field: "exchange_config.markets.symbol",
                reason: e.to_string(),
            })
    }
}

/// Settings for the in-process paper venue.
#[derive(Debug, Clone, Deserialize)]
pub struct PaperConfig {
    #[serde(default = "default_markets")]
    pub markets: Vec<PaperMarketConfig>,
    /// Candle periods in minutes `get_kline` accepts.
    #[serde(default = "default_candle_periods")]
    pub candle_periods: Vec<u32>,
    /// Commission charged on every fill, as a fraction of the acquired amount.
    #[serde(default = "default_fee_rate")]
    pub fee_rate: Decimal,
    /// Free balances credited at startup, recorded as deposits.
    #[serde(default)]
    pub initial_balances: BTreeMap<String, Decimal>,
    /// Whether `cancel_all` without a pair is accepted.
    #[serde(default)]
    pub supports_cancel_all_pairs: bool,
    /// Whether `withdraw` needs a chain.
    #[serde(default)]
    pub withdraw_chain_required: bool,
    /// Flat fee taken from the withdrawn asset.
    #[serde(default)]
    pub withdraw_fee: Decimal,
}

fn default_markets() -> Vec<PaperMarketConfig> {
    vec![
        PaperMarketConfig::new("USDT_BTC", dec!(0.01), dec!(0.0001), dec!(30000)),
        PaperMarketConfig::new("USDT_ETH", dec!(0.01), dec!(0.001), dec!(2000)),
    ]
}

fn default_candle_periods() -> Vec<u32> {
    vec![1, 5, 15, 30, 60, 240, 1440]
}

fn default_fee_rate() -> Decimal {
    dec!(0.001)
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            markets: default_markets(),
            candle_periods: default_candle_periods(),
            fee_rate: default_fee_rate(),
            initial_balances: BTreeMap::new(),
            supports_cancel_all_pairs: false,
            withdraw_chain_required: false,
            withdraw_fee: Decimal::ZERO,
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
}

impl PaperConfig {
    /// Check the settings before a venue is built from them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.markets.is_empty() {
            return Err(invalid("exchange_config.markets", "at least one market is required"));
        }

        let mut seen = HashSet::new();
        for market in &self.markets {
            let pair = market.pair()?;
            if pair.as_str() != pair.as_str().to_uppercase() {
                return Err(invalid(
                    "exchange_config.markets.symbol",
                    format!("{pair} must be uppercase"),
                ));
            }
            if !seen.insert(pair.as_str().to_string()) {
                return Err(invalid(
                    "exchange_config.markets.symbol",
                    format!("{pair} is listed twice"),
                ));
            }
            if market.tick_size <= Decimal::ZERO {
                return Err(invalid("exchange_config.markets.tick_size", "must be positive"));
            }
            if market.step_size <= Decimal::ZERO {
                return Err(invalid("exchange_config.markets.step_size", "must be positive"));
            }
            if market.last_price <= Decimal::ZERO {
                return Err(invalid("exchange_config.markets.last_price", "must be positive"));
            }
            if market.spacing() <= Decimal::ZERO {
                return Err(invalid("exchange_config.markets.seed_spacing", "must be positive"));
            }
            if market.seed_quantity <= Decimal::ZERO {
                return Err(invalid("exchange_config.markets.seed_quantity", "must be positive"));
            }
        }

        if self.candle_periods.is_empty() || self.candle_periods.contains(&0) {
            return Err(invalid(
                "exchange_config.candle_periods",
                "must list at least one non-zero period",
            ));
        }
        if self.fee_rate < Decimal::ZERO || self.fee_rate >= Decimal::ONE {
            return Err(invalid("exchange_config.fee_rate", "must be in [0, 1)"));
        }
        if self.withdraw_fee < Decimal::ZERO {
            return Err(invalid("exchange_config.withdraw_fee", "must not be negative"));
        }
        if let Some((currency, _)) = self
            .initial_balances
            .iter()
            .find(|(_, amount)| **amount < Decimal::ZERO)
        {
            return Err(invalid(
                "exchange_config.initial_balances",
                format!("{currency} must not be negative"),
            ));
        }
        Ok(())
    }
}
