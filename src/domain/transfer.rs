//! Deposits and withdrawals.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::Volume;
use super::order_book::first_break;
use super::timestamp::{unix_seconds, UnixTime};

/// One deposit or withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub time: UnixTime,
    pub amount: Volume,
    pub currency: String,
    pub txid: String,
}

impl Transfer {
    /// Normalizing constructor: seconds time, uppercase currency.
    pub fn new(
        time: i64,
        amount: Volume,
        currency: impl AsRef<str>,
        txid: impl Into<String>,
    ) -> Self {
        Self {
            time: unix_seconds(time),
            amount,
            currency: currency.as_ref().trim().to_uppercase(),
            txid: txid.into(),
        }
    }
}

/// Sort transfers ascending by time, keeping venue order for ties.
#[must_use]
pub fn sorted(mut transfers: Vec<Transfer>) -> Vec<Transfer> {
    transfers.sort_by_key(|transfer| transfer.time);
    transfers
}

/// # Errors
///
/// Returns [`DomainError::UnorderedSeries`] when times descend.
pub fn validate(transfers: &[Transfer]) -> Result<(), DomainError> {
    match first_break(transfers, |a, b| a.time <= b.time) {
        Some(index) => Err(DomainError::UnorderedSeries {
            series: "transfers",
            index,
        }),
        None => Ok(()),
    }
}
