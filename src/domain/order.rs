//! Placed orders and their enumerations.
//!
//! [`MakedOrder`] is the canonical shape of an order the account placed,
//! whether freshly acknowledged or looked up later. Amounts come in two
//! legs: `left` is the quote currency (spent on a buy), `right` the base
//! currency (acquired on a buy).
//!
//! Status literals are wire-stable, including the historical
//! `"PATIALLYFILLED"` spelling consumers already parse.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::{Price, Volume};
use super::timestamp::UnixTime;

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" | "BID" => Ok(Self::Buy),
            "SELL" | "ASK" => Ok(Self::Sell),
            other => Err(format!("unknown side '{other}'")),
        }
    }
}

/// Fill status of a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "FILLED")]
    Filled,
    #[serde(rename = "NOTFILLED")]
    NotFilled,
    #[serde(rename = "PATIALLYFILLED")]
    PartiallyFilled,
    /// The venue response could not be classified.
    #[serde(rename = "UNDEFINED")]
    Undefined,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Filled => "FILLED",
            Self::NotFilled => "NOTFILLED",
            Self::PartiallyFilled => "PATIALLYFILLED",
            Self::Undefined => "UNDEFINED",
        }
    }

    /// Derive status from the ordered and executed amount of one leg.
    ///
    /// Inconsistent inputs (non-positive order size, negative or excess
    /// execution) yield `Undefined` rather than a guess.
    #[must_use]
    pub fn classify(amount: Volume, executed: Volume) -> Self {
        if amount <= Decimal::ZERO || executed < Decimal::ZERO || executed > amount {
            Self::Undefined
        } else if executed.is_zero() {
            Self::NotFilled
        } else if executed == amount {
            Self::Filled
        } else {
            Self::PartiallyFilled
        }
    }

    /// Map a venue-native status string.
    ///
    /// Terminal states that say nothing about fills (`CANCELED`, `EXPIRED`,
    /// `REJECTED`) map to `Undefined`; use [`Status::classify`] on the
    /// executed amounts for those.
    #[must_use]
    pub fn from_venue(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();
        match key.as_str() {
            "FILLED" | "CLOSED" | "DONE" | "EXECUTED" | "COMPLETED" | "TRADE" => Self::Filled,
            "NEW" | "OPEN" | "PENDING" | "ACTIVE" | "WAIT" | "NOTFILLED" | "UNFILLED" => {
                Self::NotFilled
            }
            "PARTIALLYFILLED" | "PATIALLYFILLED" | "PARTIAL" | "PARTIALFILL" => {
                Self::PartiallyFilled
            }
            _ => Self::Undefined,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An order placed by the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MakedOrder {
    pub time: UnixTime,
    pub id: String,
    pub status: Status,
    /// Quote-currency size.
    pub left_amount: Volume,
    /// Base-currency size.
    pub right_amount: Volume,
    pub left_amount_executed: Volume,
    pub right_amount_executed: Volume,
    pub commission: Decimal,
    /// Limit price.
    pub rate: Price,
    /// Average execution price, zero until something executed.
    pub rate_executed: Price,
    pub side: Side,
}

impl MakedOrder {
    /// A freshly acknowledged limit order for `amount` base units at `price`.
    ///
    /// Nothing is known about fills yet, so the status is `Undefined` until
    /// [`MakedOrder::with_execution`] or a status query fills it in.
    /// The quote size saturates at [`Decimal::MAX`].
    #[must_use]
    pub fn acknowledged(
        id: impl Into<String>,
        side: Side,
        amount: Volume,
        price: Price,
        time: UnixTime,
    ) -> Self {
        Self {
            time,
            id: id.into(),
            status: Status::Undefined,
            left_amount: amount.saturating_mul(price),
            right_amount: amount,
            left_amount_executed: Decimal::ZERO,
            right_amount_executed: Decimal::ZERO,
            commission: Decimal::ZERO,
            rate: price,
            rate_executed: Decimal::ZERO,
            side,
        }
    }

    /// Record executed amounts and derive status and average price.
    #[must_use]
    pub fn with_execution(mut self, left_executed: Volume, right_executed: Volume) -> Self {
        self.left_amount_executed = left_executed;
        self.right_amount_executed = right_executed;
        self.status = Status::classify(self.right_amount, right_executed);
        self.rate_executed = if right_executed.is_zero() {
            Decimal::ZERO
        } else {
            left_executed / right_executed
        };
        self
    }

    /// Unexecuted base amount.
    #[must_use]
    pub fn remaining(&self) -> Volume {
        (self.right_amount - self.right_amount_executed).max(Decimal::ZERO)
    }

    /// Check `0 <= executed <= amount` on both legs.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::ExecutedOutOfBounds`] naming the offending leg.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (leg, executed, amount) in [
            ("leftAmount", self.left_amount_executed, self.left_amount),
            ("rightAmount", self.right_amount_executed, self.right_amount),
        ] {
            if executed < Decimal::ZERO || executed > amount {
                return Err(DomainError::ExecutedOutOfBounds {
                    leg,
                    executed,
                    amount,
                });
            }
        }
        Ok(())
    }
}
