//! Builders for domain primitives used across tests.

use rust_decimal_macros::dec;

use crate::domain::{MakedOrder, Side, TradingPair};

/// Parse a pair symbol, panicking on malformed input.
pub fn pair(symbol: &str) -> TradingPair {
    symbol
        .parse()
        .unwrap_or_else(|e| panic!("bad test pair {symbol}: {e}"))
}

/// An acknowledged buy of 1 at 100 with nothing executed.
pub fn maked_order(id: &str) -> MakedOrder {
    MakedOrder::acknowledged(id, Side::Buy, dec!(1), dec!(100), 1_700_000_000)
}
