//! Trading pair identifiers.
//!
//! A pair is written `<QUOTE>_<BASE>`: the left currency is spent on a buy,
//! the right one is acquired. Case is whatever the adapter uses; parsing
//! preserves it so symbols round-trip through `get_trading_pairs`.
//!
//! ```
//! use apiclient::domain::TradingPair;
//!
//! let pair: TradingPair = "USDT_BTC".parse().unwrap();
//! assert_eq!(pair.quote(), "USDT");
//! assert_eq!(pair.base(), "BTC");
//! assert_eq!(pair.to_string(), "USDT_BTC");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;

const SEPARATOR: char = '_';

/// Market identifier in `<QUOTE>_<BASE>` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TradingPair {
    symbol: String,
    split: usize,
}

impl TradingPair {
    /// Build a pair from its two currencies.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPair`] when either side is empty or
    /// contains the separator.
    pub fn new(quote: &str, base: &str) -> Result<Self, DomainError> {
        format!("{quote}{SEPARATOR}{base}").parse()
    }

    /// Full symbol, e.g. `USDT_BTC`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.symbol
    }

    /// Left currency: spent on a buy.
    #[must_use]
    pub fn quote(&self) -> &str {
        &self.symbol[..self.split]
    }

    /// Right currency: acquired on a buy.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.symbol[self.split + 1..]
    }

    /// Same pair with both currencies uppercased.
    #[must_use]
    pub fn to_uppercase(&self) -> Self {
        let quote = self.quote().to_uppercase();
        let split = quote.len();
        Self {
            symbol: format!("{quote}{SEPARATOR}{}", self.base().to_uppercase()),
            split,
        }
    }
}

impl FromStr for TradingPair {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| DomainError::InvalidPair {
            symbol: s.to_string(),
            reason,
        };

        let symbol = s.trim();
        let split = symbol
            .find(SEPARATOR)
            .ok_or_else(|| invalid("missing '_' separator"))?;
        if symbol[split + 1..].contains(SEPARATOR) {
            return Err(invalid("more than one '_' separator"));
        }
        if split == 0 || split + 1 == symbol.len() {
            return Err(invalid("quote and base must be non-empty"));
        }
        if symbol.chars().any(char::is_whitespace) {
            return Err(invalid("whitespace inside symbol"));
        }

        Ok(Self {
            symbol: symbol.to_string(),
            split,
        })
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

impl Serialize for TradingPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.symbol)
    }
}

impl<'de> Deserialize<'de> for TradingPair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
