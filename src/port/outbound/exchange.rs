//! Exchange port: the capability contract.
//!
//! [`ApiClient`] is the one interface calling code depends on. Every
//! exchange adapter implements all of it; a venue lacking a feature fails
//! that call with [`Error::Unsupported`](crate::error::Error::Unsupported)
//! instead of pretending to succeed.
//!
//! # Public and private operations
//!
//! Market data calls need no credentials. Account and trading calls need a
//! successful [`ApiClient::init`] first and fail with
//! [`ConfigError::NotInitialized`] otherwise.
//!
//! # Concurrency and cancellation
//!
//! Adapters are `Send + Sync` and shared behind `Arc`; after `init` they
//! hold only read-mostly credentials. Dropping a returned future abandons
//! the call. Nothing here retries: `buy`, `sell`, the cancels and `withdraw`
//! move real money and are retried only by the caller, guided by
//! [`Error::is_retryable`](crate::error::Error::is_retryable).

use std::fmt;

use async_trait::async_trait;

use crate::domain::{
    Balances, Decimals, HistoryPeriod, KLine, MakedOrder, MarketData, OrderBook, Price, Side,
    Trade, TradingPair, Transfer, Volume, DEFAULT_DEPTH,
};
use crate::error::{ConfigError, Result};

/// API credentials handed to [`ApiClient::init`].
///
/// Venues that do not use an account identifier ignore `account_id`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub account_id: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(
        account_id: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Check the fields a venue needs. Key and secret are always required.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for the first empty field.
    pub fn validate(&self, account_required: bool) -> std::result::Result<(), ConfigError> {
        if account_required && self.account_id.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "account_id" });
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "api_key" });
        }
        if self.api_secret.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "api_secret" });
        }
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_id", &self.account_id)
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Uniform trading API over one exchange.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Exchange name for logging/debugging.
    fn exchange_name(&self) -> &'static str;

    // INIT

    /// Store credentials for private calls.
    ///
    /// Calling it again with the same credentials is a no-op.
    ///
    /// # Errors
    ///
    /// Configuration error when a field this venue requires is empty.
    async fn init(&self, credentials: Credentials) -> Result<()>;

    // PUBLIC API

    /// Last traded price.
    async fn get_last_price(&self, symbol: &TradingPair) -> Result<Price>;

    /// Up to `depth` levels per side; asks ascending, bids descending, never
    /// crossed, whatever the venue's native order.
    async fn get_order_book(&self, symbol: &TradingPair, depth: usize) -> Result<OrderBook>;

    /// [`ApiClient::get_order_book`] with [`DEFAULT_DEPTH`].
    async fn get_order_book_default(&self, symbol: &TradingPair) -> Result<OrderBook> {
        self.get_order_book(symbol, DEFAULT_DEPTH).await
    }

    /// Price and amount precision, derived from venue metadata.
    async fn get_decs(&self, symbol: &TradingPair) -> Result<Decimals>;

    /// The `count` most recent candles of `candle_period_minutes`, ascending.
    ///
    /// # Errors
    ///
    /// Invalid-parameter error when the venue has no such period.
    async fn get_kline(
        &self,
        symbol: &TradingPair,
        candle_period_minutes: u32,
        count: usize,
    ) -> Result<KLine>;

    /// Up to `count` most recent public trades, ascending by time.
    async fn get_trade_history(&self, symbol: &TradingPair, count: usize) -> Result<Vec<Trade>>;

    /// 24h statistics snapshot.
    async fn get_market_data(&self, symbol: &TradingPair) -> Result<MarketData>;

    /// Every pair the venue lists, in this adapter's symbol format.
    async fn get_trading_pairs(&self) -> Result<Vec<TradingPair>>;

    // PRIVATE API

    /// Non-zero balances keyed by uppercase currency.
    async fn get_balances(&self) -> Result<Balances>;

    /// # Errors
    ///
    /// Not-found error when `id` is not an order of this account.
    async fn get_order_status(&self, id: &str, symbol: &TradingPair) -> Result<MakedOrder>;

    /// Place a limit sell of `amount` base units at `price`.
    ///
    /// With `check`, the status is queried right after placement and
    /// resolved in the result. Without it the result reflects only the
    /// placement acknowledgment. If the order was placed but the follow-up
    /// query failed, the error is
    /// [`Error::Unresolved`](crate::error::Error::Unresolved) carrying the
    /// order.
    async fn sell(
        &self,
        symbol: &TradingPair,
        amount: Volume,
        price: Price,
        check: bool,
    ) -> Result<MakedOrder>;

    /// Place a limit buy; see [`ApiClient::sell`].
    async fn buy(
        &self,
        symbol: &TradingPair,
        amount: Volume,
        price: Price,
        check: bool,
    ) -> Result<MakedOrder>;

    /// Dispatch to [`ApiClient::buy`] or [`ApiClient::sell`].
    async fn place(
        &self,
        side: Side,
        symbol: &TradingPair,
        amount: Volume,
        price: Price,
        check: bool,
    ) -> Result<MakedOrder> {
        match side {
            Side::Buy => self.buy(symbol, amount, price, check).await,
            Side::Sell => self.sell(symbol, amount, price, check).await,
        }
    }

    async fn cancel_order(&self, symbol: &TradingPair, id: &str) -> Result<()>;

    /// Cancel every open order on `symbol`, or on all pairs for `None`.
    ///
    /// # Errors
    ///
    /// Unsupported-operation error when the venue cannot cancel across pairs.
    async fn cancel_all(&self, symbol: Option<&TradingPair>) -> Result<()>;

    /// Open orders on `symbol`, or on all pairs for `None`.
    async fn get_my_open_orders(&self, symbol: Option<&TradingPair>) -> Result<Vec<MakedOrder>>;

    /// Orders with executions inside `period`.
    async fn get_my_trade_history(
        &self,
        symbol: Option<&TradingPair>,
        period: HistoryPeriod,
    ) -> Result<Vec<MakedOrder>>;

    /// Orders placed inside `period`, in any state.
    async fn get_my_order_history(
        &self,
        symbol: Option<&TradingPair>,
        period: HistoryPeriod,
    ) -> Result<Vec<MakedOrder>>;

    /// Request a withdrawal and return the venue's tracking id.
    ///
    /// # Errors
    ///
    /// Invalid-parameter error when the venue needs `chain` and it is absent.
    async fn withdraw(
        &self,
        asset: &str,
        address: &str,
        amount: Volume,
        chain: Option<&str>,
    ) -> Result<String>;

    /// Full withdrawal history, ascending by time. Unpaginated.
    async fn get_withdraw_list(&self) -> Result<Vec<Transfer>>;

    /// Full deposit history, ascending by time. Unpaginated.
    async fn get_deposit_list(&self) -> Result<Vec<Transfer>>;
}
