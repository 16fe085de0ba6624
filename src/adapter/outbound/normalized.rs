//! Normalization guard for any [`ApiClient`].
//!
//! Wraps an adapter and enforces the data-model invariants on everything it
//! returns, so calling code can rely on them even when an adapter's
//! translation of venue responses is sloppy:
//!
//! - order books are re-sorted, merged, uncrossed and cut to depth
//! - candles and trades are re-ordered and cut to count
//! - balances drop zero entries and uppercase their keys
//! - transfers are sorted by time
//! - orders with executed amounts outside their bounds are rejected
//!
//! Repairs are logged at `warn` since they point at an adapter bug. Zero
//! depths and counts are rejected before the inner adapter is called.

use async_trait::async_trait;
use tracing::warn;

use crate::domain::error::DomainError;
use crate::domain::{
    balance, trade, transfer, Balances, Bar, Decimals, HistoryPeriod, KLine, MakedOrder,
    MarketData, OrderBook, Price, Status, Trade, TradingPair, Transfer, Volume,
};
use crate::error::{Error, Result};
use crate::port::outbound::exchange::{ApiClient, Credentials};

/// Invariant-enforcing wrapper around an adapter.
pub struct Normalized<C: ApiClient> {
    inner: C,
}

impl<C: ApiClient> Normalized<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// The wrapped adapter.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    fn repaired(&self, what: &'static str, reason: &DomainError) {
        warn!(
            exchange = self.inner.exchange_name(),
            what,
            reason = %reason,
            "Adapter output violated invariants, repaired"
        );
    }

    fn checked_order(&self, order: MakedOrder) -> Result<MakedOrder> {
        if let Err(err) = order.validate() {
            warn!(
                exchange = self.inner.exchange_name(),
                order_id = %order.id,
                reason = %err,
                "Adapter returned order with impossible execution"
            );
            return Err(err.into());
        }
        Ok(order)
    }

    fn checked_orders(&self, orders: Vec<MakedOrder>) -> Result<Vec<MakedOrder>> {
        orders
            .into_iter()
            .map(|order| self.checked_order(order))
            .collect()
    }

    fn placed(&self, result: Result<MakedOrder>, check: bool) -> Result<MakedOrder> {
        match result {
            Ok(order) => {
                if check && order.status == Status::Undefined {
                    warn!(
                        exchange = self.inner.exchange_name(),
                        order_id = %order.id,
                        "Status still undefined after checked placement"
                    );
                }
                self.checked_order(order)
            }
            Err(Error::Unresolved { order, source }) => Err(Error::Unresolved {
                order: Box::new(self.checked_order(*order)?),
                source,
            }),
            Err(err) => Err(err),
        }
    }

    fn sorted_transfers(&self, transfers: Vec<Transfer>) -> Vec<Transfer> {
        if let Err(reason) = transfer::validate(&transfers) {
            self.repaired("transfers", &reason);
            return transfer::sorted(transfers);
        }
        transfers
    }
}

fn nonzero(what: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(DomainError::ZeroLimit(what).into());
    }
    Ok(())
}

fn rebuild_kline(kline: KLine, count: usize) -> Result<KLine> {
    if kline.price_candles.len() != kline.volume_candles.len() {
        return Err(DomainError::MismatchedCandles {
            index: kline.price_candles.len().min(kline.volume_candles.len()),
        }
        .into());
    }
    let mut volumes: Vec<_> = kline.volume_candles;
    volumes.sort_by_key(|v| v.time);
    let mut prices = kline.price_candles;
    prices.sort_by_key(|p| p.time);

    let bars = prices
        .into_iter()
        .zip(volumes)
        .enumerate()
        .map(|(index, (price, volume))| {
            if price.time == volume.time {
                Ok(Bar {
                    time: price.time,
                    open: price.open,
                    high: price.high,
                    low: price.low,
                    close: price.close,
                    volume: volume.value,
                })
            } else {
                Err(Error::from(DomainError::MismatchedCandles { index }))
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(KLine::from_bars(bars, count))
}

#[async_trait]
impl<C: ApiClient> ApiClient for Normalized<C> {
    fn exchange_name(&self) -> &'static str {
        self.inner.exchange_name()
    }

    async fn init(&self, credentials: Credentials) -> Result<()> {
        self.inner.init(credentials).await
    }

    async fn get_last_price(&self, symbol: &TradingPair) -> Result<Price> {
        self.inner.get_last_price(symbol).await
    }

    async fn get_order_book(&self, symbol: &TradingPair, depth: usize) -> Result<OrderBook> {
        nonzero("depth", depth)?;
        let book = self.inner.get_order_book(symbol, depth).await?;
        match book.validate(Some(depth)) {
            Ok(()) => Ok(book),
            Err(reason) => {
                self.repaired("order book", &reason);
                Ok(OrderBook::normalized(book.asks, book.bids, depth))
            }
        }
    }

    async fn get_decs(&self, symbol: &TradingPair) -> Result<Decimals> {
        self.inner.get_decs(symbol).await
    }

    async fn get_kline(
        &self,
        symbol: &TradingPair,
        candle_period_minutes: u32,
        count: usize,
    ) -> Result<KLine> {
        nonzero("count", count)?;
        let kline = self
            .inner
            .get_kline(symbol, candle_period_minutes, count)
            .await?;
        match kline.validate(Some(count)) {
            Ok(()) => Ok(kline),
            Err(reason) => {
                self.repaired("kline", &reason);
                rebuild_kline(kline, count)
            }
        }
    }

    async fn get_trade_history(&self, symbol: &TradingPair, count: usize) -> Result<Vec<Trade>> {
        nonzero("count", count)?;
        let mut trades = self.inner.get_trade_history(symbol, count).await?;
        if let Err(reason) = trade::validate(&trades, Some(count)) {
            self.repaired("trades", &reason);
            trades.sort_by_key(|t| t.time);
            let skip = trades.len().saturating_sub(count);
            trades.drain(..skip);
        }
        Ok(trades)
    }

    async fn get_market_data(&self, symbol: &TradingPair) -> Result<MarketData> {
        self.inner.get_market_data(symbol).await
    }

    async fn get_trading_pairs(&self) -> Result<Vec<TradingPair>> {
        let mut pairs = self.inner.get_trading_pairs().await?;
        let mut seen = std::collections::HashSet::new();
        pairs.retain(|pair| seen.insert(pair.clone()));
        Ok(pairs)
    }

    async fn get_balances(&self) -> Result<Balances> {
        let balances = self.inner.get_balances().await?;
        match balance::validate(&balances) {
            Ok(()) => Ok(balances),
            Err(reason) => {
                self.repaired("balances", &reason);
                Ok(balance::collect_non_zero(balances))
            }
        }
    }

    async fn get_order_status(&self, id: &str, symbol: &TradingPair) -> Result<MakedOrder> {
        let order = self.inner.get_order_status(id, symbol).await?;
        self.checked_order(order)
    }

    async fn sell(
        &self,
        symbol: &TradingPair,
        amount: Volume,
        price: Price,
        check: bool,
    ) -> Result<MakedOrder> {
        let result = self.inner.sell(symbol, amount, price, check).await;
        self.placed(result, check)
    }

    async fn buy(
        &self,
        symbol: &TradingPair,
        amount: Volume,
        price: Price,
        check: bool,
    ) -> Result<MakedOrder> {
        let result = self.inner.buy(symbol, amount, price, check).await;
        self.placed(result, check)
    }

    async fn cancel_order(&self, symbol: &TradingPair, id: &str) -> Result<()> {
        self.inner.cancel_order(symbol, id).await
    }

    async fn cancel_all(&self, symbol: Option<&TradingPair>) -> Result<()> {
        self.inner.cancel_all(symbol).await
    }

    async fn get_my_open_orders(&self, symbol: Option<&TradingPair>) -> Result<Vec<MakedOrder>> {
        let orders = self.inner.get_my_open_orders(symbol).await?;
        self.checked_orders(orders)
    }

    async fn get_my_trade_history(
        &self,
        symbol: Option<&TradingPair>,
        period: HistoryPeriod,
    ) -> Result<Vec<MakedOrder>> {
        let orders = self.inner.get_my_trade_history(symbol, period).await?;
        self.checked_orders(orders)
    }

    async fn get_my_order_history(
        &self,
        symbol: Option<&TradingPair>,
        period: HistoryPeriod,
    ) -> Result<Vec<MakedOrder>> {
        let orders = self.inner.get_my_order_history(symbol, period).await?;
        self.checked_orders(orders)
    }

    async fn withdraw(
        &self,
        asset: &str,
        address: &str,
        amount: Volume,
        chain: Option<&str>,
    ) -> Result<String> {
        self.inner.withdraw(asset, address, amount, chain).await
    }

    async fn get_withdraw_list(&self) -> Result<Vec<Transfer>> {
        let transfers = self.inner.get_withdraw_list().await?;
        Ok(self.sorted_transfers(transfers))
    }

    async fn get_deposit_list(&self) -> Result<Vec<Transfer>> {
        let transfers = self.inner.get_deposit_list().await?;
        Ok(self.sorted_transfers(transfers))
    }
}
