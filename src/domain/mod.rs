//! Exchange-agnostic data model.
//!
//! Every adapter translates venue-native responses into these types. The
//! ordering and enumeration invariants live next to each type, together with
//! the normalization helpers adapters share:
//!
//! - [`order_book::OrderBook::normalized`] sorts, merges and uncrosses levels
//! - [`candle::KLine::from_bars`] orders and trims candles
//! - [`trade::infer_sides`] fills in missing trade sides
//! - [`balance::collect_non_zero`] filters and uppercases balances
//! - [`order::Status::classify`] derives order status from amounts

pub mod balance;
pub mod candle;
pub mod error;
pub mod market;
pub mod money;
pub mod order;
pub mod order_book;
pub mod pair;
pub mod period;
pub mod timestamp;
pub mod trade;
pub mod transfer;

pub use balance::{Balance, Balances};
pub use candle::{Bar, Color, KLine, PriceCandle, VolumeCandle};
pub use market::{Decimals, MarketData};
pub use money::{Price, Volume};
pub use order::{MakedOrder, Side, Status};
pub use order_book::{Order, OrderBook, DEFAULT_DEPTH};
pub use pair::TradingPair;
pub use period::HistoryPeriod;
pub use trade::Trade;
pub use transfer::Transfer;
