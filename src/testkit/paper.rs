//! Canonical paper venue settings and clients.
//!
//! The venue runs on a manual clock frozen at [`START`] so times in
//! assertions are exact.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal_macros::dec;

use crate::adapter::outbound::normalized::Normalized;
use crate::adapter::outbound::paper::{Clock, PaperClient, PaperConfig, PaperMarketConfig, PaperVenue};
use crate::domain::timestamp::UnixTime;
use crate::port::outbound::exchange::Credentials;

/// Venue clock at startup.
pub const START: UnixTime = 1_700_000_000;

/// Two markets with round numbers and a funded account.
///
/// - `USDT_BTC`: tick 0.01, step 0.0001, last 100, house levels 1 apart
/// - `USDT_ETH`: tick 0.01, step 0.001, last 10
/// - 10 000 USDT and 10 BTC free, no fees
pub fn paper_config() -> PaperConfig {
    let mut initial_balances = BTreeMap::new();
    initial_balances.insert("USDT".to_string(), dec!(10000));
    initial_balances.insert("BTC".to_string(), dec!(10));

    PaperConfig {
        markets: vec![
            PaperMarketConfig {
                seed_levels: 20,
                seed_spacing: Some(dec!(1)),
                history_minutes: 240,
                ..PaperMarketConfig::new("USDT_BTC", dec!(0.01), dec!(0.0001), dec!(100))
            },
            PaperMarketConfig::new("USDT_ETH", dec!(0.01), dec!(0.001), dec!(10)),
        ],
        fee_rate: dec!(0),
        initial_balances,
        ..PaperConfig::default()
    }
}

/// Credentials the paper venue accepts.
pub fn credentials() -> Credentials {
    Credentials::new("test-account", "test-key", "test-secret")
}

/// A venue for `config` on the frozen clock.
pub fn venue(config: &PaperConfig) -> Arc<PaperVenue> {
    Arc::new(
        PaperVenue::with_clock(config, Clock::Manual(START))
            .unwrap_or_else(|e| panic!("invalid test config: {e}")),
    )
}

/// A guarded, uninitialized client for `config`.
pub fn guarded_client(config: &PaperConfig) -> Normalized<PaperClient> {
    Normalized::new(PaperClient::with_venue(venue(config), config))
}
