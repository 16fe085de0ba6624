//! Candle (KLine) types.
//!
//! A [`KLine`] is two parallel series, price candles and volume candles,
//! ascending by time and paired by index. A volume candle is
//! [`Color::Green`] when its price candle closed above the open and
//! [`Color::Red`] otherwise; an unchanged candle is red.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;
use super::money::{Price, Volume};
use super::order_book::first_break;
use super::timestamp::{unix_seconds, UnixTime};

/// Volume candle color, serialized as the CSS color charting frontends use.
///
/// Emits the spaced form, `"rgba(255, 82, 82, 0.5)"` and
/// `"rgba(0, 150, 136, 0.5)"`. The compact form without spaces is accepted
/// on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Down candle (or unchanged).
    Red,
    /// Up candle.
    Green,
}

impl Color {
    const RED: &'static str = "rgba(255, 82, 82, 0.5)";
    const GREEN: &'static str = "rgba(0, 150, 136, 0.5)";

    /// Green iff the candle closed above its open.
    #[must_use]
    pub fn for_move(open: Price, close: Price) -> Self {
        if close > open {
            Self::Green
        } else {
            Self::Red
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => Self::RED,
            Self::Green => Self::GREEN,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        match compact.as_str() {
            "rgba(255,82,82,0.5)" => Ok(Self::Red),
            "rgba(0,150,136,0.5)" => Ok(Self::Green),
            _ => Err(serde::de::Error::custom(format!("unknown candle color '{raw}'"))),
        }
    }
}

/// OHLC candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceCandle {
    pub time: UnixTime,
    pub open: Price,
    pub close: Price,
    pub high: Price,
    pub low: Price,
}

/// Volume candle paired with the [`PriceCandle`] at the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeCandle {
    pub time: UnixTime,
    pub value: Volume,
    pub color: Color,
}

/// One venue-native candle before it is split into the two series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub time: i64,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Volume,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KLine {
    pub price_candles: Vec<PriceCandle>,
    pub volume_candles: Vec<VolumeCandle>,
}

impl KLine {
    /// Build both series from bars in any order.
    ///
    /// Times are folded to seconds, bars sharing a time keep the one that
    /// came last, and only the `count` most recent survive.
    #[must_use]
    pub fn from_bars(bars: impl IntoIterator<Item = Bar>, count: usize) -> Self {
        let mut bars: Vec<Bar> = bars
            .into_iter()
            .map(|bar| Bar {
                time: unix_seconds(bar.time),
                ..bar
            })
            .collect();
        bars.sort_by_key(|bar| bar.time);

        let mut unique: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match unique.last_mut() {
                Some(last) if last.time == bar.time => *last = bar,
                _ => unique.push(bar),
            }
        }
        let skip = unique.len().saturating_sub(count);

        let mut kline = Self::default();
        for bar in unique.into_iter().skip(skip) {
            kline.price_candles.push(PriceCandle {
                time: bar.time,
                open: bar.open,
                close: bar.close,
                high: bar.high,
                low: bar.low,
            });
            kline.volume_candles.push(VolumeCandle {
                time: bar.time,
                value: bar.volume,
                color: Color::for_move(bar.open, bar.close),
            });
        }
        kline
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.price_candles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.price_candles.is_empty()
    }

    /// Check pairing, ordering, colors and the optional count bound.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self, count: Option<usize>) -> Result<(), DomainError> {
        if self.price_candles.len() != self.volume_candles.len() {
            return Err(DomainError::MismatchedCandles {
                index: self.price_candles.len().min(self.volume_candles.len()),
            });
        }
        if let Some(limit) = count {
            if self.len() > limit {
                return Err(DomainError::LimitExceeded {
                    what: "kline",
                    len: self.len(),
                    limit,
                });
            }
        }
        if let Some(index) = first_break(&self.price_candles, |a, b| a.time < b.time) {
            return Err(DomainError::UnorderedSeries {
                series: "price candles",
                index,
            });
        }
        for (index, (price, volume)) in self
            .price_candles
            .iter()
            .zip(&self.volume_candles)
            .enumerate()
        {
            if price.time != volume.time {
                return Err(DomainError::MismatchedCandles { index });
            }
            if volume.color != Color::for_move(price.open, price.close) {
                return Err(DomainError::CandleColor { time: price.time });
            }
        }
        Ok(())
    }
}

/// Check a requested candle period against the ones a venue offers.
///
/// # Errors
///
/// Returns [`DomainError::UnsupportedCandlePeriod`] when `minutes` is not
/// in `supported`.
pub fn check_period(minutes: u32, supported: &[u32]) -> Result<(), DomainError> {
    if supported.contains(&minutes) {
        Ok(())
    } else {
        Err(DomainError::UnsupportedCandlePeriod {
            minutes,
            supported: supported.to_vec(),
        })
    }
}
