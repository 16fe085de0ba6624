//! [`ApiClient`] over the paper venue.
//!
//! Translates venue-native responses into the normalized model through the
//! shared domain helpers, the same path an adapter for a remote exchange
//! takes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::settings::PaperConfig;
use super::venue::{NativeLevel, NativeOrder, NativeTransfer, OrderFilter, PaperVenue};
use crate::adapter::outbound::session::Session;
use crate::domain::market::DayStats;
use crate::domain::timestamp::unix_seconds;
use crate::domain::{
    balance, candle, trade, transfer, Balances, Decimals, HistoryPeriod, KLine, MakedOrder,
    MarketData, Order, OrderBook, Price, Side, Status, Trade, TradingPair, Transfer, Volume,
};
use crate::error::{ConfigError, Error, Result};
use crate::port::outbound::exchange::{ApiClient, Credentials};

const EXCHANGE: &str = "paper";

/// Paper trading adapter.
pub struct PaperClient {
    venue: Arc<PaperVenue>,
    session: Session,
    supports_cancel_all_pairs: bool,
    withdraw_chain_required: bool,
    withdraw_fee: Volume,
}

impl PaperClient {
    /// Build a client with its own venue.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` fails validation.
    pub fn new(config: &PaperConfig) -> std::result::Result<Self, ConfigError> {
        let venue = Arc::new(PaperVenue::new(config)?);
        Ok(Self::with_venue(venue, config))
    }

    /// Build a client on an existing venue; several clients may share one.
    #[must_use]
    pub fn with_venue(venue: Arc<PaperVenue>, config: &PaperConfig) -> Self {
        Self {
            venue,
            session: Session::new(),
            supports_cancel_all_pairs: config.supports_cancel_all_pairs,
            withdraw_chain_required: config.withdraw_chain_required,
            withdraw_fee: config.withdraw_fee,
        }
    }

    /// The simulated venue, for seeding and fault injection.
    #[must_use]
    pub fn venue(&self) -> &Arc<PaperVenue> {
        &self.venue
    }

    fn authorized(&self) -> Result<()> {
        self.session.credentials().map(|_| ())
    }

    async fn place_order(
        &self,
        side: Side,
        symbol: &TradingPair,
        amount: Volume,
        price: Price,
        check: bool,
    ) -> Result<MakedOrder> {
        self.authorized()?;
        let id = self.venue.place(symbol.as_str(), side, amount, price)?;
        info!(
            exchange = EXCHANGE,
            symbol = %symbol,
            %side,
            %amount,
            %price,
            order_id = %id,
            "Order placed"
        );

        let acknowledged = MakedOrder::acknowledged(id, side, amount, price, self.venue.now());
        if !check {
            return Ok(acknowledged);
        }
        match self.venue.order(&acknowledged.id) {
            Ok(native) => Ok(maked_order(&native)),
            Err(source) => Err(Error::Unresolved {
                order: Box::new(acknowledged),
                source: Box::new(source),
            }),
        }
    }

    fn history(
        &self,
        symbol: Option<&TradingPair>,
        filter: OrderFilter,
    ) -> Result<Vec<MakedOrder>> {
        self.authorized()?;
        let orders = self.venue.orders(symbol.map(TradingPair::as_str), filter)?;
        Ok(orders.iter().map(maked_order).collect())
    }
}

/// Translate a venue order record.
fn maked_order(native: &NativeOrder) -> MakedOrder {
    let mut order = MakedOrder::acknowledged(
        native.id.clone(),
        native.side,
        native.quantity,
        native.price,
        unix_seconds(native.created_ms),
    )
    .with_execution(native.executed_quote, native.executed_quantity);

    // Fills at better prices shrink the quote leg.
    order.left_amount = native.executed_quote + order.remaining() * native.price;
    order.commission = native.commission;
    match Status::from_venue(native.status) {
        Status::Undefined => {}
        status => order.status = status,
    }
    order
}

fn transfers(native: Vec<NativeTransfer>) -> Vec<Transfer> {
    transfer::sorted(
        native
            .into_iter()
            .map(|t| Transfer::new(t.time_ms, t.amount, t.asset, t.txid))
            .collect(),
    )
}

#[async_trait]
impl ApiClient for PaperClient {
    fn exchange_name(&self) -> &'static str {
        EXCHANGE
    }

    async fn init(&self, credentials: Credentials) -> Result<()> {
        self.session.init(EXCHANGE, credentials, false)
    }

    async fn get_last_price(&self, symbol: &TradingPair) -> Result<Price> {
        let ticker = self.venue.ticker(symbol.as_str())?;
        debug!(symbol = %symbol, price = %ticker.last, "Last price");
        Ok(ticker.last)
    }

    async fn get_order_book(&self, symbol: &TradingPair, depth: usize) -> Result<OrderBook> {
        let native = self.venue.depth(symbol.as_str())?;
        let side = |levels: Vec<NativeLevel>| -> Vec<Order> {
            levels
                .into_iter()
                .map(|level| Order::new(level.quantity, level.price))
                .collect()
        };
        let book = OrderBook::normalized(side(native.asks), side(native.bids), depth);
        debug!(
            symbol = %symbol,
            asks = book.asks.len(),
            bids = book.bids.len(),
            "Order book"
        );
        Ok(book)
    }

    async fn get_decs(&self, symbol: &TradingPair) -> Result<Decimals> {
        let (tick, step) = self.venue.steps(symbol.as_str())?;
        Ok(Decimals::from_steps(tick, step))
    }

    async fn get_kline(
        &self,
        symbol: &TradingPair,
        candle_period_minutes: u32,
        count: usize,
    ) -> Result<KLine> {
        candle::check_period(candle_period_minutes, self.venue.candle_periods())?;
        let bars = self.venue.candles(symbol.as_str(), candle_period_minutes)?;
        Ok(KLine::from_bars(bars, count))
    }

    async fn get_trade_history(&self, symbol: &TradingPair, count: usize) -> Result<Vec<Trade>> {
        let prints = self.venue.prints(symbol.as_str())?;
        Ok(trade::normalize(prints, count))
    }

    async fn get_market_data(&self, symbol: &TradingPair) -> Result<MarketData> {
        let ticker = self.venue.ticker(symbol.as_str())?;
        let book = self.get_order_book(symbol, 1).await?;
        Ok(MarketData::from_day(
            DayStats {
                open: ticker.open,
                last: ticker.last,
                high: ticker.high,
                low: ticker.low,
                volume_left: ticker.quote_volume,
                volume_right: ticker.base_volume,
            },
            &book,
        ))
    }

    async fn get_trading_pairs(&self) -> Result<Vec<TradingPair>> {
        self.venue
            .symbols()
            .iter()
            .map(|symbol| symbol.parse::<TradingPair>().map_err(Error::from))
            .collect()
    }

    async fn get_balances(&self) -> Result<Balances> {
        self.authorized()?;
        Ok(balance::collect_non_zero(self.venue.balances()?))
    }

    async fn get_order_status(&self, id: &str, symbol: &TradingPair) -> Result<MakedOrder> {
        self.authorized()?;
        let native = self.venue.order(id)?;
        if native.symbol != symbol.as_str() {
            return Err(Error::NotFound(format!("order {id} on {symbol}")));
        }
        Ok(maked_order(&native))
    }

    async fn sell(
        &self,
        symbol: &TradingPair,
        amount: Volume,
        price: Price,
        check: bool,
    ) -> Result<MakedOrder> {
        self.place_order(Side::Sell, symbol, amount, price, check).await
    }

    async fn buy(
        &self,
        symbol: &TradingPair,
        amount: Volume,
        price: Price,
        check: bool,
    ) -> Result<MakedOrder> {
        self.place_order(Side::Buy, symbol, amount, price, check).await
    }

    async fn cancel_order(&self, symbol: &TradingPair, id: &str) -> Result<()> {
        self.authorized()?;
        self.venue.cancel(symbol.as_str(), id)?;
        info!(exchange = EXCHANGE, symbol = %symbol, order_id = id, "Order cancelled");
        Ok(())
    }

    async fn cancel_all(&self, symbol: Option<&TradingPair>) -> Result<()> {
        self.authorized()?;
        if symbol.is_none() && !self.supports_cancel_all_pairs {
            return Err(Error::Unsupported(
                "cancel_all across pairs requires a symbol on this venue".into(),
            ));
        }
        let cancelled = self.venue.cancel_all(symbol.map(TradingPair::as_str))?;
        info!(
            exchange = EXCHANGE,
            symbol = symbol.map_or("*", TradingPair::as_str),
            cancelled,
            "Orders cancelled"
        );
        Ok(())
    }

    async fn get_my_open_orders(&self, symbol: Option<&TradingPair>) -> Result<Vec<MakedOrder>> {
        self.history(symbol, OrderFilter::Open)
    }

    async fn get_my_trade_history(
        &self,
        symbol: Option<&TradingPair>,
        period: HistoryPeriod,
    ) -> Result<Vec<MakedOrder>> {
        let since = period.since(self.venue.now());
        self.history(symbol, OrderFilter::FilledSince(since))
    }

    async fn get_my_order_history(
        &self,
        symbol: Option<&TradingPair>,
        period: HistoryPeriod,
    ) -> Result<Vec<MakedOrder>> {
        let since = period.since(self.venue.now());
        self.history(symbol, OrderFilter::CreatedSince(since))
    }

    async fn withdraw(
        &self,
        asset: &str,
        address: &str,
        amount: Volume,
        chain: Option<&str>,
    ) -> Result<String> {
        self.authorized()?;
        if address.trim().is_empty() {
            return Err(Error::invalid("address", "must not be empty"));
        }
        if self.withdraw_chain_required && chain.map_or(true, |c| c.trim().is_empty()) {
            return Err(Error::invalid("chain", "this venue needs a chain for withdrawals"));
        }
        let asset = asset.trim().to_uppercase();
        let id = self
            .venue
            .withdraw(&asset, address, amount, self.withdraw_fee)?;
        info!(
            exchange = EXCHANGE,
            asset = %asset,
            %amount,
            chain = chain.unwrap_or("-"),
            withdraw_id = %id,
            "Withdrawal requested"
        );
        Ok(id)
    }

    async fn get_withdraw_list(&self) -> Result<Vec<Transfer>> {
        self.authorized()?;
        Ok(transfers(self.venue.withdrawals()?))
    }

    async fn get_deposit_list(&self) -> Result<Vec<Transfer>> {
        self.authorized()?;
        Ok(transfers(self.venue.deposits()?))
    }
}
