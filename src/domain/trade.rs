//! Public trade tape entries.
//!
//! Trades are returned ascending by time. Some venues publish prints without
//! an aggressor side; [`infer_sides`] fills those in with the tick rule:
//!
//! - price up from the previous print: `Buy`
//! - price down: `Sell`
//! - unchanged: same side as the previous print
//! - first print with no side: `Buy`
//!
//! The tick rule is a heuristic. Inferred sides are best-effort and never as
//! reliable as a venue-reported aggressor flag.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::{Price, Volume};
use super::order::Side;
use super::order_book::first_break;
use super::timestamp::{unix_seconds, UnixTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub time: UnixTime,
    pub amount: Volume,
    pub price: Price,
    pub side: Side,
}

/// A print as the venue reported it, side optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTrade {
    pub time: i64,
    pub amount: Volume,
    pub price: Price,
    pub side: Option<Side>,
}

/// Resolve missing sides with the tick rule. Input must be chronological.
#[must_use]
pub fn infer_sides(raw: impl IntoIterator<Item = RawTrade>) -> Vec<Trade> {
    let mut previous: Option<(Price, Side)> = None;
    raw.into_iter()
        .map(|print| {
            let side = print.side.unwrap_or_else(|| match previous {
                Some((last, _)) if print.price > last => Side::Buy,
                Some((last, _)) if print.price < last => Side::Sell,
                Some((_, side)) => side,
                None => Side::Buy,
            });
            previous = Some((print.price, side));
            Trade {
                time: unix_seconds(print.time),
                amount: print.amount,
                price: print.price,
                side,
            }
        })
        .collect()
}

/// Order prints by time, infer missing sides and keep the `count` most recent.
#[must_use]
pub fn normalize(raw: impl IntoIterator<Item = RawTrade>, count: usize) -> Vec<Trade> {
    let mut raw: Vec<RawTrade> = raw.into_iter().collect();
    raw.sort_by_key(|print| unix_seconds(print.time));

    let mut trades = infer_sides(raw);
    let skip = trades.len().saturating_sub(count);
    trades.drain(..skip);
    trades
}

/// Check ascending time and the optional count bound.
///
/// # Errors
///
/// Returns the first violated invariant.
pub fn validate(trades: &[Trade], count: Option<usize>) -> Result<(), DomainError> {
    if let Some(limit) = count {
        if trades.len() > limit {
            return Err(DomainError::LimitExceeded {
                what: "trades",
                len: trades.len(),
                limit,
            });
        }
    }
    match first_break(trades, |a, b| a.time <= b.time) {
        Some(index) => Err(DomainError::UnorderedSeries {
            series: "trades",
            index,
        }),
        None => Ok(()),
    }
}
