//! apiclient - a uniform trading API over cryptocurrency exchanges.
//!
//! Calling code talks to any venue through one async contract,
//! [`ApiClient`](port::outbound::exchange::ApiClient), and receives results
//! in one normalized data model whose ordering and enumeration invariants
//! hold whatever the venue's native format.
//!
//! # Architecture
//!
//! - [`domain`] - Exchange-agnostic types and the normalization helpers
//!   adapters share
//! - [`port`] - The capability contract
//! - [`adapter`] - Exchange adapters, the normalization guard and the CLI
//! - [`infrastructure`] - Configuration, logging and the client factory
//! - [`error`] - Error taxonomy
//!
//! # Example
//!
//! ```no_run
//! use apiclient::domain::TradingPair;
//! use apiclient::infrastructure::config::settings::Config;
//! use apiclient::infrastructure::exchange::ExchangeFactory;
//!
//! # async fn example() -> apiclient::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let client = ExchangeFactory::create_client(&config)?;
//!
//! let pair: TradingPair = "USDT_BTC".parse()?;
//! let book = client.get_order_book(&pair, 5).await?;
//! println!("best ask {:?}", book.best_ask());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
