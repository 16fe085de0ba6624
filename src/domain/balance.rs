//! Account balances.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::Volume;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// Available for new orders.
    pub free: Volume,
    /// Held by open orders or pending withdrawals.
    pub locked: Volume,
}

impl Balance {
    #[must_use]
    pub const fn new(free: Volume, locked: Volume) -> Self {
        Self { free, locked }
    }

    #[must_use]
    pub fn total(&self) -> Volume {
        self.free + self.locked
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.free.is_zero() && self.locked.is_zero()
    }
}

/// Non-zero balances keyed by uppercase currency symbol.
pub type Balances = BTreeMap<String, Balance>;

/// Build [`Balances`] from venue entries: keys are trimmed and uppercased,
/// entries for the same currency are summed, and zero balances dropped.
#[must_use]
pub fn collect_non_zero<K: AsRef<str>>(entries: impl IntoIterator<Item = (K, Balance)>) -> Balances {
    let mut balances = Balances::new();
    for (currency, balance) in entries {
        let key = currency.as_ref().trim().to_uppercase();
        if key.is_empty() {
            continue;
        }
        let entry = balances.entry(key).or_default();
        entry.free += balance.free;
        entry.locked += balance.locked;
    }
    balances.retain(|_, balance| !balance.is_zero());
    balances
}

/// Check that no zero entry and no lowercase key slipped through.
///
/// # Errors
///
/// Returns the first offending currency.
pub fn validate(balances: &Balances) -> Result<(), DomainError> {
    for (currency, balance) in balances {
        if balance.is_zero() {
            return Err(DomainError::ZeroBalance(currency.clone()));
        }
        if *currency != currency.to_uppercase() {
            return Err(DomainError::CurrencyCase(currency.clone()));
        }
    }
    Ok(())
}

impl From<(Decimal, Decimal)> for Balance {
    fn from((free, locked): (Decimal, Decimal)) -> Self {
        Self::new(free, locked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn drops_zero_and_uppercases() {
        let balances = collect_non_zero(vec![
            ("btc", Balance::new(dec!(1), dec!(0))),
            ("eth", Balance::new(dec!(0), dec!(0))),
            ("Usdt", Balance::new(dec!(0), dec!(5))),
        ]);

        assert_eq!(balances.len(), 2);
        assert_eq!(balances["BTC"].free, dec!(1));
        assert_eq!(balances["USDT"].locked, dec!(5));
        assert!(!balances.contains_key("ETH"));
        assert!(validate(&balances).is_ok());
    }

    #[test]
    fn merges_duplicate_keys() {
        let balances = collect_non_zero(vec![
            ("btc".to_string(), Balance::new(dec!(1), dec!(0))),
            ("BTC".to_string(), Balance::new(dec!(0.5), dec!(0.25))),
        ]);

        assert_eq!(balances["BTC"], Balance::new(dec!(1.5), dec!(0.25)));
        assert_eq!(balances["BTC"].total(), dec!(1.75));
    }

    #[test]
    fn merged_entries_that_cancel_out_are_dropped() {
        let balances = collect_non_zero(vec![
            ("XRP", Balance::new(dec!(1), dec!(0))),
            ("xrp", Balance::new(dec!(-1), dec!(0))),
        ]);
        assert!(balances.is_empty());
    }

    #[test]
    fn validate_flags_zero_and_case() {
        let mut balances = Balances::new();
        balances.insert("BTC".into(), Balance::default());
        assert!(matches!(validate(&balances), Err(DomainError::ZeroBalance(_))));

        let mut balances = Balances::new();
        balances.insert("btc".into(), Balance::new(dec!(1), dec!(0)));
        assert!(matches!(validate(&balances), Err(DomainError::CurrencyCase(_))));
    }
}
