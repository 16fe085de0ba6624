//! Account history windows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::timestamp::UnixTime;

const DAY_SECS: i64 = 86_400;

/// Look-back window for trade and order history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryPeriod {
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "1w")]
    Week,
    /// Thirty days.
    #[serde(rename = "1m")]
    Month,
}

impl HistoryPeriod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "1d",
            Self::Week => "1w",
            Self::Month => "1m",
        }
    }

    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Day => DAY_SECS,
            Self::Week => 7 * DAY_SECS,
            Self::Month => 30 * DAY_SECS,
        }
    }

    /// Earliest timestamp inside the window ending at `now`.
    #[must_use]
    pub const fn since(self, now: UnixTime) -> UnixTime {
        now - self.seconds()
    }
}

impl FromStr for HistoryPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(Self::Day),
            "1w" => Ok(Self::Week),
            "1m" => Ok(Self::Month),
            other => Err(DomainError::InvalidPeriod(other.to_string())),
        }
    }
}

impl fmt::Display for HistoryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
