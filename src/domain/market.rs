//! Per-pair metadata and statistics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::money::{Price, Volume};
use super::order_book::OrderBook;

/// Decimal places a venue accepts for price and amount on one pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decimals {
    pub price_decs: u32,
    pub amount_decs: u32,
}

impl Decimals {
    #[must_use]
    pub const fn new(price_decs: u32, amount_decs: u32) -> Self {
        Self {
            price_decs,
            amount_decs,
        }
    }

    /// Derive decimal counts from a venue's tick size and lot step,
    /// e.g. `0.01` and `0.0001` give `2` and `4`.
    #[must_use]
    pub fn from_steps(tick_size: Decimal, step_size: Decimal) -> Self {
        Self::new(decimal_places(tick_size), decimal_places(step_size))
    }
}

fn decimal_places(step: Decimal) -> u32 {
    step.normalize().scale()
}

/// Point-in-time statistics for one pair.
///
/// `priceChnagePerc` and `priceChnageAbs` are the established wire keys and
/// are kept as-is; the correctly spelled keys are accepted on input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    /// 24h volume in the quote currency.
    pub volume_left: Volume,
    /// 24h volume in the base currency.
    pub volume_right: Volume,
    /// Last traded price.
    pub price: Price,
    #[serde(rename = "priceChnagePerc", alias = "priceChangePerc")]
    pub price_change_perc: Decimal,
    #[serde(rename = "priceChnageAbs", alias = "priceChangeAbs")]
    pub price_change_abs: Decimal,
    pub spread_perc: Decimal,
    /// Best ask.
    pub min_sell: Price,
    /// Best bid.
    pub max_buy: Price,
    pub day_price_high: Price,
    pub day_price_low: Price,
}

/// Raw 24h figures a venue reports, before derived fields are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayStats {
    pub open: Price,
    pub last: Price,
    pub high: Price,
    pub low: Price,
    pub volume_left: Volume,
    pub volume_right: Volume,
}

impl MarketData {
    /// Combine 24h figures with the current top of book.
    #[must_use]
    pub fn from_day(stats: DayStats, book: &OrderBook) -> Self {
        let min_sell = book.best_ask().map_or(Decimal::ZERO, |o| o.price);
        let max_buy = book.best_bid().map_or(Decimal::ZERO, |o| o.price);
        let change = stats.last - stats.open;

        Self {
            volume_left: stats.volume_left,
            volume_right: stats.volume_right,
            price: stats.last,
            price_change_perc: percent_of(change, stats.open),
            price_change_abs: change,
            spread_perc: Self::spread_perc(min_sell, max_buy),
            min_sell,
            max_buy,
            day_price_high: stats.high,
            day_price_low: stats.low,
        }
    }

    /// Spread as a percentage of the best ask; zero when either side is
    /// missing.
    #[must_use]
    pub fn spread_perc(min_sell: Price, max_buy: Price) -> Decimal {
        if min_sell <= Decimal::ZERO || max_buy <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        percent_of(min_sell - max_buy, min_sell)
    }
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        (part / whole * Decimal::ONE_HUNDRED).round_dp(8)
    }
}
