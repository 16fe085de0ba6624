//! Domain validation errors for the normalized data model.
//!
//! Returned by parsers (`TradingPair`, `HistoryPeriod`) and by the
//! `validate` methods that check ordering and bound invariants on values an
//! adapter produced.
//!
//! ```
//! use apiclient::domain::error::DomainError;
//! use apiclient::domain::TradingPair;
//!
//! let result = "USDTBTC".parse::<TradingPair>();
//! assert!(matches!(result, Err(DomainError::InvalidPair { .. })));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A pair symbol is not in `<QUOTE>_<BASE>` form.
    #[error("invalid trading pair '{symbol}': {reason}")]
    InvalidPair { symbol: String, reason: &'static str },

    /// A history period outside `1d`, `1w`, `1m`.
    #[error("invalid history period '{0}': expected one of 1d, 1w, 1m")]
    InvalidPeriod(String),

    /// A candle period the venue does not offer.
    #[error("unsupported candle period {minutes}m, supported: {supported:?}")]
    UnsupportedCandlePeriod { minutes: u32, supported: Vec<u32> },

    /// A count or depth of zero.
    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),

    /// Price levels are not strictly ordered on one side of a book.
    #[error("{side} not strictly ordered at level {index}")]
    UnorderedLevels { side: &'static str, index: usize },

    /// Best bid is at or above best ask.
    #[error("crossed book: best bid {best_bid} >= best ask {best_ask}")]
    CrossedBook { best_bid: Decimal, best_ask: Decimal },

    /// A time series is not ascending.
    #[error("{series} not ascending by time at index {index}")]
    UnorderedSeries { series: &'static str, index: usize },

    /// Price and volume candles do not pair up by index.
    #[error("candle series mismatch at index {index}")]
    MismatchedCandles { index: usize },

    /// A volume candle's color disagrees with its price candle.
    #[error("volume candle color disagrees with open/close at time {time}")]
    CandleColor { time: i64 },

    /// More entries than the caller asked for.
    #[error("{what} returned {len} entries, limit is {limit}")]
    LimitExceeded {
        what: &'static str,
        len: usize,
        limit: usize,
    },

    /// Executed amount outside `0..=amount`.
    #[error("{leg} executed {executed} outside 0..={amount}")]
    ExecutedOutOfBounds {
        leg: &'static str,
        executed: Decimal,
        amount: Decimal,
    },

    /// A balance entry with nothing free and nothing locked.
    #[error("zero balance reported for {0}")]
    ZeroBalance(String),

    /// A balance key that is not uppercase.
    #[error("balance key '{0}' is not uppercase")]
    CurrencyCase(String),
}

impl DomainError {
    /// Whether this error stems from a caller-supplied value rather than
    /// from data a venue returned.
    #[must_use]
    pub fn is_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidPair { .. }
                | Self::InvalidPeriod(_)
                | Self::UnsupportedCandlePeriod { .. }
                | Self::ZeroLimit(_)
        )
    }
}
