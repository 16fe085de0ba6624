//! Order book types for market depth representation.
//!
//! An order book has two sides:
//! - **Asks**: sell orders, strictly ascending by price (best ask first)
//! - **Bids**: buy orders, strictly descending by price (best bid first)
//!
//! and every ask is priced above every bid. Venues rarely guarantee all of
//! that, so adapters build books through [`OrderBook::normalized`].
//!
//! ```
//! use apiclient::domain::{Order, OrderBook};
//! use rust_decimal_macros::dec;
//!
//! let asks = vec![Order::new(dec!(1), dec!(101)), Order::new(dec!(2), dec!(100))];
//! let bids = vec![Order::new(dec!(1), dec!(98)), Order::new(dec!(3), dec!(99))];
//!
//! let book = OrderBook::normalized(asks, bids, 50);
//! assert_eq!(book.best_ask().unwrap().price, dec!(100));
//! assert_eq!(book.best_bid().unwrap().price, dec!(99));
//! assert!(book.validate(Some(50)).is_ok());
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::{Price, Volume};

/// Levels per side returned when the caller does not ask for a depth.
pub const DEFAULT_DEPTH: usize = 50;

/// A single price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Token amount available at this price.
    pub quantity: Volume,
    /// Price of one token.
    pub price: Price,
}

impl Order {
    #[must_use]
    pub const fn new(quantity: Volume, price: Price) -> Self {
        Self { quantity, price }
    }
}

/// Sorted, uncrossed depth snapshot for one pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    /// Sell side, ascending by price. Every ask is above every bid.
    pub asks: Vec<Order>,
    /// Buy side, descending by price.
    pub bids: Vec<Order>,
}

impl OrderBook {
    /// Build a book from venue-native levels in any order.
    ///
    /// Levels with a non-positive price or quantity are dropped and levels
    /// sharing a price are merged. A crossed top of book is treated as stale
    /// data: while the best bid is at or above the best ask, the smaller of
    /// the two top levels is discarded (both when equal in size). Each side
    /// is then cut to `depth` levels.
    #[must_use]
    pub fn normalized(asks: Vec<Order>, bids: Vec<Order>, depth: usize) -> Self {
        let mut asks: Vec<Order> = merge_levels(asks).into_iter().map(to_order).collect();
        let mut bids: Vec<Order> = merge_levels(bids).into_iter().rev().map(to_order).collect();

        let (mut ask_start, mut bid_start) = (0, 0);
        while let (Some(ask), Some(bid)) = (asks.get(ask_start), bids.get(bid_start)) {
            if bid.price < ask.price {
                break;
            }
            if ask.quantity <= bid.quantity {
                ask_start += 1;
            }
            if bid.quantity <= ask.quantity {
                bid_start += 1;
            }
        }
        asks.drain(..ask_start);
        bids.drain(..bid_start);

        asks.truncate(depth);
        bids.truncate(depth);
        Self { asks, bids }
    }

    /// Best ask (lowest sell price).
    #[must_use]
    pub fn best_ask(&self) -> Option<&Order> {
        self.asks.first()
    }

    /// Best bid (highest buy price).
    #[must_use]
    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.first()
    }

    /// Absolute spread between best ask and best bid.
    #[must_use]
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()?.price - self.best_bid()?.price)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }

    /// Check ordering, the no-cross rule and, when given, the depth bound.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self, depth: Option<usize>) -> Result<(), DomainError> {
        if let Some(limit) = depth {
            for (what, len) in [("asks", self.asks.len()), ("bids", self.bids.len())] {
                if len > limit {
                    return Err(DomainError::LimitExceeded { what, len, limit });
                }
            }
        }
        if let Some(index) = first_break(&self.asks, |prev, next| prev.price < next.price) {
            return Err(DomainError::UnorderedLevels { side: "asks", index });
        }
        if let Some(index) = first_break(&self.bids, |prev, next| prev.price > next.price) {
            return Err(DomainError::UnorderedLevels { side: "bids", index });
        }
        if let (Some(ask), Some(bid)) = (self.best_ask(), self.best_bid()) {
            if bid.price >= ask.price {
                return Err(DomainError::CrossedBook {
                    best_bid: bid.price,
                    best_ask: ask.price,
                });
            }
        }
        Ok(())
    }
}

/// Index of the first element that breaks `ordered` against its predecessor.
pub(crate) fn first_break<T>(items: &[T], ordered: impl Fn(&T, &T) -> bool) -> Option<usize> {
    items
        .windows(2)
        .position(|pair| !ordered(&pair[0], &pair[1]))
        .map(|i| i + 1)
}

fn merge_levels(levels: Vec<Order>) -> BTreeMap<Price, Volume> {
    let mut merged = BTreeMap::new();
    for level in levels {
        if level.price <= Decimal::ZERO || level.quantity <= Decimal::ZERO {
            continue;
        }
        *merged.entry(level.price).or_insert(Decimal::ZERO) += level.quantity;
    }
    merged
}

fn to_order((price, quantity): (Price, Volume)) -> Order {
    Order::new(quantity, price)
}
