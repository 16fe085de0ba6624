//! In-process simulated venue.
//!
//! Holds a price-time priority book per market, the account's orders and
//! balances, the public trade tape and the transfer ledgers. Responses come
//! back in venue-native shape, the way a remote exchange would send them:
//! bids ascending, one entry per resting order, tape newest-first with
//! millisecond times, prints sometimes missing a side, balance keys in
//! lowercase with zero entries left in. The paper client translates them
//! into the normalized model.
//!
//! Limit orders match immediately against the opposite side at the resting
//! level's price; any remainder rests. Funds for an order are locked on
//! placement and released on fill or cancel.

use std::collections::{BTreeMap, HashSet, VecDeque};

use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use super::settings::{PaperConfig, PaperMarketConfig};
use crate::domain::timestamp::{self, UnixTime};
use crate::domain::trade::RawTrade;
use crate::domain::{Balance, Bar, Price, Side, TradingPair, Volume};
use crate::error::{ConfigError, Error, RemoteError, Result};

/// Time source for the venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    /// Frozen at the given Unix second until advanced.
    Manual(UnixTime),
}

impl Clock {
    fn now(self) -> UnixTime {
        match self {
            Self::System => timestamp::now(),
            Self::Manual(at) => at,
        }
    }
}

/// Venue calls a one-shot failure can be injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Ticker,
    Depth,
    Candles,
    Prints,
    Balances,
    Place,
    OrderStatus,
    Cancel,
    Orders,
    Withdraw,
    Transfers,
}

/// One resting order as the venue lists it in a depth snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeLevel {
    pub price: Price,
    pub quantity: Volume,
}

/// Depth snapshot. Both sides ascending by price, unmerged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeDepth {
    pub asks: Vec<NativeLevel>,
    pub bids: Vec<NativeLevel>,
}

/// 24h ticker figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeTicker {
    pub open: Price,
    pub last: Price,
    pub high: Price,
    pub low: Price,
    pub base_volume: Volume,
    pub quote_volume: Volume,
}

/// Order record as the venue reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeOrder {
    pub id: String,
    pub symbol: String,
    pub side: Side,
    pub price: Price,
    pub quantity: Volume,
    pub executed_quantity: Volume,
    pub executed_quote: Volume,
    pub commission: Decimal,
    /// Milliseconds.
    pub created_ms: i64,
    /// Milliseconds of the last fill.
    pub updated_ms: Option<i64>,
    pub status: &'static str,
}

/// Deposit or withdrawal ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeTransfer {
    /// Milliseconds.
    pub time_ms: i64,
    pub asset: String,
    pub amount: Volume,
    pub txid: String,
}

/// Which orders to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFilter {
    Open,
    /// Created at or after the given second.
    CreatedSince(UnixTime),
    /// Filled at least once at or after the given second.
    FilledSince(UnixTime),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Owner {
    House,
    Account(String),
}

#[derive(Debug, Clone)]
struct Resting {
    owner: Owner,
    quantity: Volume,
}

type Levels = BTreeMap<Price, VecDeque<Resting>>;

#[derive(Debug, Clone, Copy)]
struct Print {
    time: UnixTime,
    amount: Volume,
    price: Price,
    side: Option<Side>,
}

#[derive(Debug)]
struct Market {
    pair: TradingPair,
    tick_size: Decimal,
    step_size: Decimal,
    last_price: Price,
    asks: Levels,
    bids: Levels,
    /// Chronological.
    tape: Vec<Print>,
}

const HISTORY_SHAPE: [i64; 8] = [0, 1, 2, 1, 0, -1, -2, -1];

impl Market {
    fn seeded(config: &PaperMarketConfig, pair: TradingPair, start: UnixTime) -> Self {
        let spacing = config.spacing();
        let house = |quantity| {
            VecDeque::from([Resting {
                owner: Owner::House,
                quantity,
            }])
        };

        let mut asks = Levels::new();
        let mut bids = Levels::new();
        for level in 1..=config.seed_levels {
            let offset = spacing * Decimal::from(level);
            asks.insert(config.last_price + offset, house(config.seed_quantity));
            let bid = config.last_price - offset;
            if bid > Decimal::ZERO {
                bids.insert(bid, house(config.seed_quantity));
            }
        }

        let minutes = config.history_minutes;
        let tape = (0..minutes)
            .map(|i| {
                let back = minutes - i;
                let shape = HISTORY_SHAPE[(back - 1) % HISTORY_SHAPE.len()];
                let price = config.last_price + spacing * Decimal::from(shape);
                Print {
                    time: start - 60 * back as i64,
                    amount: config.seed_quantity,
                    price: if price > Decimal::ZERO {
                        price
                    } else {
                        config.last_price
                    },
                    side: None,
                }
            })
            .collect();

        Self {
            pair,
            tick_size: config.tick_size,
            step_size: config.step_size,
            last_price: config.last_price,
            asks,
            bids,
            tape,
        }
    }

    fn last_price(&self) -> Price {
        self.tape.last().map_or(self.last_price, |print| print.price)
    }
}

#[derive(Debug, Clone)]
struct AccountOrder {
    id: String,
    symbol: String,
    side: Side,
    price: Price,
    quantity: Volume,
    executed_quantity: Volume,
    executed_quote: Volume,
    commission: Decimal,
    created: UnixTime,
    last_fill: Option<UnixTime>,
    cancelled: bool,
}

impl AccountOrder {
    fn remaining(&self) -> Volume {
        self.quantity - self.executed_quantity
    }

    fn is_open(&self) -> bool {
        !self.cancelled && self.remaining() > Decimal::ZERO
    }

    fn status(&self) -> &'static str {
        if self.remaining().is_zero() {
            "FILLED"
        } else if self.cancelled {
            "CANCELED"
        } else if self.executed_quantity.is_zero() {
            "NEW"
        } else {
            "PARTIALLY_FILLED"
        }
    }

    fn native(&self) -> NativeOrder {
        NativeOrder {
            id: self.id.clone(),
            symbol: self.symbol.clone(),
            side: self.side,
            price: self.price,
            quantity: self.quantity,
            executed_quantity: self.executed_quantity,
            executed_quote: self.executed_quote,
            commission: self.commission,
            created_ms: self.created * 1000,
            updated_ms: self.last_fill.map(|t| t * 1000),
            status: self.status(),
        }
    }
}

#[derive(Debug)]
struct State {
    clock: Clock,
    markets: Vec<Market>,
    orders: Vec<AccountOrder>,
    balances: BTreeMap<String, Balance>,
    withdrawals: Vec<NativeTransfer>,
    deposits: Vec<NativeTransfer>,
    faults: HashSet<Operation>,
}

fn rejected(code: &str, message: impl Into<String>) -> Error {
    RemoteError::Rejected {
        code: code.to_string(),
        message: message.into(),
    }
    .into()
}

fn unknown_symbol(symbol: &str) -> Error {
    Error::invalid("symbol", format!("{symbol} is not listed"))
}

impl State {
    fn take_fault(&mut self, operation: Operation) -> Result<()> {
        if self.faults.remove(&operation) {
            return Err(RemoteError::Transport(format!("injected {operation:?} failure")).into());
        }
        Ok(())
    }

    fn market_index(&self, symbol: &str) -> Result<usize> {
        self.markets
            .iter()
            .position(|m| m.pair.as_str() == symbol)
            .ok_or_else(|| unknown_symbol(symbol))
    }

    fn market(&self, symbol: &str) -> Result<&Market> {
        let index = self.market_index(symbol)?;
        Ok(&self.markets[index])
    }

    fn order_index(&self, id: &str) -> Result<usize> {
        self.orders
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| Error::NotFound(format!("order {id}")))
    }

    fn credit(&mut self, asset: &str, amount: Volume, time: UnixTime) {
        self.balances.entry(asset.to_lowercase()).or_default().free += amount;
        self.deposits.push(NativeTransfer {
            time_ms: time * 1000,
            asset: asset.to_lowercase(),
            amount,
            txid: Uuid::new_v4().simple().to_string(),
        });
    }

    fn balance(&mut self, asset: &str) -> &mut Balance {
        self.balances.entry(asset.to_lowercase()).or_default()
    }

    /// Apply one fill to an account order and its balances.
    fn settle(
        &mut self,
        index: usize,
        pair: &TradingPair,
        quantity: Volume,
        price: Price,
        fee_rate: Decimal,
        now: UnixTime,
    ) {
        let order = &mut self.orders[index];
        order.executed_quantity += quantity;
        order.executed_quote += quantity * price;
        order.last_fill = Some(now);

        match order.side {
            Side::Buy => {
                let limit = order.price;
                let fee = quantity * fee_rate;
                order.commission += fee;
                let quote = self.balance(pair.quote());
                quote.locked -= quantity * limit;
                quote.free += quantity * (limit - price);
                self.balance(pair.base()).free += quantity - fee;
            }
            Side::Sell => {
                let proceeds = quantity * price;
                let fee = proceeds * fee_rate;
                order.commission += fee;
                self.balance(pair.base()).locked -= quantity;
                self.balance(pair.quote()).free += proceeds - fee;
            }
        }
    }

    /// Match a taker against the opposite side. Returns the unfilled rest.
    fn match_taker(
        &mut self,
        market: usize,
        taker: usize,
        fee_rate: Decimal,
        now: UnixTime,
    ) -> Volume {
        let (side, limit, mut remaining) = {
            let order = &self.orders[taker];
            (order.side, order.price, order.remaining())
        };

        let mut fills: Vec<(Owner, Volume, Price)> = Vec::new();
        let book = &mut self.markets[market];
        let opposite = match side {
            Side::Buy => &mut book.asks,
            Side::Sell => &mut book.bids,
        };
        while !remaining.is_zero() {
            let best = match side {
                Side::Buy => opposite.first_entry(),
                Side::Sell => opposite.last_entry(),
            };
            let Some(mut level) = best else { break };
            let price = *level.key();
            let crosses = match side {
                Side::Buy => price <= limit,
                Side::Sell => price >= limit,
            };
            if !crosses {
                break;
            }

            let queue = level.get_mut();
            while !remaining.is_zero() {
                let Some(front) = queue.front_mut() else { break };
                let quantity = remaining.min(front.quantity);
                front.quantity -= quantity;
                remaining -= quantity;
                fills.push((front.owner.clone(), quantity, price));
                if front.quantity.is_zero() {
                    queue.pop_front();
                }
            }
            if queue.is_empty() {
                level.remove();
            }
        }

        let pair = self.markets[market].pair.clone();
        for (owner, quantity, price) in fills {
            self.markets[market].tape.push(Print {
                time: now,
                amount: quantity,
                price,
                side: Some(side),
            });
            self.settle(taker, &pair, quantity, price, fee_rate, now);
            if let Owner::Account(id) = owner {
                if let Ok(maker) = self.order_index(&id) {
                    self.settle(maker, &pair, quantity, price, fee_rate, now);
                }
            }
            debug!(
                symbol = %pair,
                %side,
                %quantity,
                %price,
                "Paper fill"
            );
        }
        remaining
    }

    fn release(&mut self, index: usize) {
        let order = &self.orders[index];
        let remaining = order.remaining();
        let (side, price, id, symbol) = (order.side, order.price, order.id.clone(), order.symbol.clone());

        if let Ok(market) = self.market_index(&symbol) {
            let market = &mut self.markets[market];
            let levels = match side {
                Side::Buy => &mut market.bids,
                Side::Sell => &mut market.asks,
            };
            if let Some(queue) = levels.get_mut(&price) {
                queue.retain(|r| r.owner != Owner::Account(id.clone()));
                if queue.is_empty() {
                    levels.remove(&price);
                }
            }
            let pair = market.pair.clone();
            match side {
                Side::Buy => {
                    let quote = self.balance(pair.quote());
                    quote.locked -= remaining * price;
                    quote.free += remaining * price;
                }
                Side::Sell => {
                    let base = self.balance(pair.base());
                    base.locked -= remaining;
                    base.free += remaining;
                }
            }
        }
        self.orders[index].cancelled = true;
    }
}

/// Shared simulated exchange.
#[derive(Debug)]
pub struct PaperVenue {
    fee_rate: Decimal,
    candle_periods: Vec<u32>,
    state: Mutex<State>,
}

impl PaperVenue {
    /// Build a venue on the system clock.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` fails validation.
    pub fn new(config: &PaperConfig) -> std::result::Result<Self, ConfigError> {
        Self::with_clock(config, Clock::System)
    }

    /// Build a venue on the given clock.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` fails validation.
    pub fn with_clock(config: &PaperConfig, clock: Clock) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let start = clock.now();

        let mut markets = Vec::with_capacity(config.markets.len());
        for market in &config.markets {
            markets.push(Market::seeded(market, market.pair()?, start));
        }

        let mut state = State {
            clock,
            markets,
            orders: Vec::new(),
            balances: BTreeMap::new(),
            withdrawals: Vec::new(),
            deposits: Vec::new(),
            faults: HashSet::new(),
        };
        for (asset, amount) in &config.initial_balances {
            state.credit(asset, *amount, start);
        }

        Ok(Self {
            fee_rate: config.fee_rate,
            candle_periods: config.candle_periods.clone(),
            state: Mutex::new(state),
        })
    }

    #[must_use]
    pub fn now(&self) -> UnixTime {
        self.state.lock().clock.now()
    }

    /// Move the clock forward, freezing a system clock at the new time.
    pub fn advance(&self, seconds: i64) {
        let mut state = self.state.lock();
        state.clock = Clock::Manual(state.clock.now() + seconds);
    }

    /// Make the next call of `operation` fail with a transport error.
    pub fn fail_next(&self, operation: Operation) {
        self.state.lock().faults.insert(operation);
    }

    /// Credit a free balance and record the deposit.
    pub fn deposit(&self, asset: &str, amount: Volume) {
        let mut state = self.state.lock();
        let now = state.clock.now();
        state.credit(asset, amount, now);
    }

    /// Append a print to a market's tape, at the current time when `time`
    /// is `None`.
    ///
    /// # Errors
    ///
    /// Invalid-parameter error for an unlisted symbol.
    pub fn record_trade(
        &self,
        symbol: &str,
        price: Price,
        amount: Volume,
        side: Option<Side>,
        time: Option<UnixTime>,
    ) -> Result<()> {
        let mut state = self.state.lock();
        let now = state.clock.now();
        let index = state.market_index(symbol)?;
        let tape = &mut state.markets[index].tape;
        tape.push(Print {
            time: time.unwrap_or(now),
            amount,
            price,
            side,
        });
        tape.sort_by_key(|print| print.time);
        Ok(())
    }

    #[must_use]
    pub fn candle_periods(&self) -> &[u32] {
        &self.candle_periods
    }

    #[must_use]
    pub fn symbols(&self) -> Vec<String> {
        self.state
            .lock()
            .markets
            .iter()
            .map(|m| m.pair.as_str().to_string())
            .collect()
    }

    /// Tick and step size of a market.
    ///
    /// # Errors
    ///
    /// Invalid-parameter error for an unlisted symbol.
    pub fn steps(&self, symbol: &str) -> Result<(Decimal, Decimal)> {
        let state = self.state.lock();
        let market = state.market(symbol)?;
        Ok((market.tick_size, market.step_size))
    }

    /// # Errors
    ///
    /// Invalid-parameter error for an unlisted symbol, or an injected fault.
    pub fn ticker(&self, symbol: &str) -> Result<NativeTicker> {
        let mut state = self.state.lock();
        state.take_fault(Operation::Ticker)?;
        let since = state.clock.now() - 86_400;
        let market = state.market(symbol)?;
        let last = market.last_price();

        let window: Vec<&Print> = market.tape.iter().filter(|p| p.time > since).collect();
        let Some(first) = window.first() else {
            return Ok(NativeTicker {
                open: last,
                last,
                high: last,
                low: last,
                base_volume: Decimal::ZERO,
                quote_volume: Decimal::ZERO,
            });
        };
        Ok(NativeTicker {
            open: first.price,
            last,
            high: window.iter().map(|p| p.price).max().unwrap_or(last),
            low: window.iter().map(|p| p.price).min().unwrap_or(last),
            base_volume: window.iter().map(|p| p.amount).sum(),
            quote_volume: window.iter().map(|p| p.amount * p.price).sum(),
        })
    }

    /// Full depth, one entry per resting order.
    ///
    /// # Errors
    ///
    /// Invalid-parameter error for an unlisted symbol, or an injected fault.
    pub fn depth(&self, symbol: &str) -> Result<NativeDepth> {
        let mut state = self.state.lock();
        state.take_fault(Operation::Depth)?;
        let market = state.market(symbol)?;
        let flatten = |levels: &Levels| {
            levels
                .iter()
                .flat_map(|(price, queue)| {
                    queue.iter().map(|r| NativeLevel {
                        price: *price,
                        quantity: r.quantity,
                    })
                })
                .collect()
        };
        Ok(NativeDepth {
            asks: flatten(&market.asks),
            bids: flatten(&market.bids),
        })
    }

    /// Bars of `minutes` built from the tape, newest first, times in
    /// milliseconds.
    ///
    /// # Errors
    ///
    /// Invalid-parameter error for an unlisted symbol, or an injected fault.
    pub fn candles(&self, symbol: &str, minutes: u32) -> Result<Vec<Bar>> {
        let mut state = self.state.lock();
        state.take_fault(Operation::Candles)?;
        let market = state.market(symbol)?;
        let width = i64::from(minutes) * 60;

        let mut buckets: BTreeMap<i64, Bar> = BTreeMap::new();
        for print in &market.tape {
            let open_time = print.time - print.time.rem_euclid(width);
            buckets
                .entry(open_time)
                .and_modify(|bar| {
                    bar.high = bar.high.max(print.price);
                    bar.low = bar.low.min(print.price);
                    bar.close = print.price;
                    bar.volume += print.amount;
                })
                .or_insert(Bar {
                    time: open_time * 1000,
                    open: print.price,
                    high: print.price,
                    low: print.price,
                    close: print.price,
                    volume: print.amount,
                });
        }
        Ok(buckets.into_values().rev().collect())
    }

    /// The public tape, newest first, times in milliseconds.
    ///
    /// # Errors
    ///
    /// Invalid-parameter error for an unlisted symbol, or an injected fault.
    pub fn prints(&self, symbol: &str) -> Result<Vec<RawTrade>> {
        let mut state = self.state.lock();
        state.take_fault(Operation::Prints)?;
        let market = state.market(symbol)?;
        Ok(market
            .tape
            .iter()
            .rev()
            .map(|print| RawTrade {
                time: print.time * 1000,
                amount: print.amount,
                price: print.price,
                side: print.side,
            })
            .collect())
    }

    /// Every balance ever touched, lowercase keys, zeros included.
    ///
    /// # Errors
    ///
    /// An injected fault.
    pub fn balances(&self) -> Result<Vec<(String, Balance)>> {
        let mut state = self.state.lock();
        state.take_fault(Operation::Balances)?;
        Ok(state
            .balances
            .iter()
            .map(|(asset, balance)| (asset.clone(), *balance))
            .collect())
    }

    /// Place a limit order, match what crosses and rest the remainder.
    ///
    /// # Errors
    ///
    /// Invalid-parameter error for an unlisted symbol, a non-positive
    /// amount or price, or a notional that overflows; rejection when free funds do not cover the order.
    pub fn place(&self, symbol: &str, side: Side, quantity: Volume, price: Price) -> Result<String> {
        if quantity <= Decimal::ZERO {
            return Err(Error::invalid("amount", "must be positive"));
        }
        if price <= Decimal::ZERO {
            return Err(Error::invalid("price", "must be positive"));
        }
        let notional = quantity
            .checked_mul(price)
            .ok_or_else(|| Error::invalid("amount", "amount * price overflows"))?;

        let mut state = self.state.lock();
        state.take_fault(Operation::Place)?;
        let market = state.market_index(symbol)?;
        let pair = state.markets[market].pair.clone();
        let now = state.clock.now();

        let (asset, needed) = match side {
            Side::Buy => (pair.quote(), notional),
            Side::Sell => (pair.base(), quantity),
        };
        let funds = state.balance(asset);
        if funds.free < needed {
            return Err(rejected(
                "INSUFFICIENT_BALANCE",
                format!("{needed} {asset} needed, {} free", funds.free),
            ));
        }
        funds.free -= needed;
        funds.locked += needed;

        let id = Uuid::new_v4().to_string();
        state.orders.push(AccountOrder {
            id: id.clone(),
            symbol: symbol.to_string(),
            side,
            price,
            quantity,
            executed_quantity: Decimal::ZERO,
            executed_quote: Decimal::ZERO,
            commission: Decimal::ZERO,
            created: now,
            last_fill: None,
            cancelled: false,
        });
        let taker = state.orders.len() - 1;

        let rest = state.match_taker(market, taker, self.fee_rate, now);
        if !rest.is_zero() {
            let levels = match side {
                Side::Buy => &mut state.markets[market].bids,
                Side::Sell => &mut state.markets[market].asks,
            };
            levels.entry(price).or_default().push_back(Resting {
                owner: Owner::Account(id.clone()),
                quantity: rest,
            });
        }
        Ok(id)
    }

    /// # Errors
    ///
    /// Not-found error for an id this account never placed.
    pub fn order(&self, id: &str) -> Result<NativeOrder> {
        let mut state = self.state.lock();
        state.take_fault(Operation::OrderStatus)?;
        let index = state.order_index(id)?;
        Ok(state.orders[index].native())
    }

    /// Account orders matching `filter`, oldest first.
    ///
    /// # Errors
    ///
    /// Invalid-parameter error for an unlisted symbol, or an injected fault.
    pub fn orders(&self, symbol: Option<&str>, filter: OrderFilter) -> Result<Vec<NativeOrder>> {
        let mut state = self.state.lock();
        state.take_fault(Operation::Orders)?;
        if let Some(symbol) = symbol {
            state.market_index(symbol)?;
        }
        Ok(state
            .orders
            .iter()
            .filter(|o| symbol.map_or(true, |s| o.symbol == s))
            .filter(|o| match filter {
                OrderFilter::Open => o.is_open(),
                OrderFilter::CreatedSince(since) => o.created >= since,
                OrderFilter::FilledSince(since) => o.last_fill.is_some_and(|t| t >= since),
            })
            .map(AccountOrder::native)
            .collect())
    }

    /// # Errors
    ///
    /// Not-found error when `id` is not an order on `symbol`; rejection when
    /// it is no longer open.
    pub fn cancel(&self, symbol: &str, id: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.take_fault(Operation::Cancel)?;
        state.market_index(symbol)?;
        let index = state.order_index(id)?;
        if state.orders[index].symbol != symbol {
            return Err(Error::NotFound(format!("order {id} on {symbol}")));
        }
        if !state.orders[index].is_open() {
            return Err(rejected("ORDER_CLOSED", format!("order {id} is not open")));
        }
        state.release(index);
        Ok(())
    }

    /// Cancel open orders on one market or on all of them. Returns the
    /// number cancelled.
    ///
    /// # Errors
    ///
    /// Invalid-parameter error for an unlisted symbol, or an injected fault.
    pub fn cancel_all(&self, symbol: Option<&str>) -> Result<usize> {
        let mut state = self.state.lock();
        state.take_fault(Operation::Cancel)?;
        if let Some(symbol) = symbol {
            state.market_index(symbol)?;
        }
        let open: Vec<usize> = state
            .orders
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_open() && symbol.map_or(true, |s| o.symbol == s))
            .map(|(i, _)| i)
            .collect();
        for index in &open {
            state.release(*index);
        }
        Ok(open.len())
    }

    /// Debit `amount` plus `fee` from the free balance and record the
    /// withdrawal. Returns its id.
    ///
    /// # Errors
    ///
    /// Invalid-parameter error for a non-positive amount; rejection when
    /// free funds do not cover amount and fee.
    pub fn withdraw(&self, asset: &str, address: &str, amount: Volume, fee: Volume) -> Result<String> {
        if amount <= Decimal::ZERO {
            return Err(Error::invalid("amount", "must be positive"));
        }
        let mut state = self.state.lock();
        state.take_fault(Operation::Withdraw)?;
        let now = state.clock.now();

        let total = amount + fee;
        let balance = state.balance(asset);
        if balance.free < total {
            return Err(rejected(
                "INSUFFICIENT_BALANCE",
                format!("{total} {asset} needed, {} free", balance.free),
            ));
        }
        balance.free -= total;

        let id = Uuid::new_v4().simple().to_string();
        debug!(asset, address, %amount, id = %id, "Paper withdrawal");
        state.withdrawals.push(NativeTransfer {
            time_ms: now * 1000,
            asset: asset.to_lowercase(),
            amount,
            txid: id.clone(),
        });
        Ok(id)
    }

    /// Withdrawal ledger, newest first.
    ///
    /// # Errors
    ///
    /// An injected fault.
    pub fn withdrawals(&self) -> Result<Vec<NativeTransfer>> {
        let mut state = self.state.lock();
        state.take_fault(Operation::Transfers)?;
        Ok(state.withdrawals.iter().rev().cloned().collect())
    }

    /// Deposit ledger, newest first.
    ///
    /// # Errors
    ///
    /// An injected fault.
    pub fn deposits(&self) -> Result<Vec<NativeTransfer>> {
        let mut state = self.state.lock();
        state.take_fault(Operation::Transfers)?;
        Ok(state.deposits.iter().rev().cloned().collect())
    }
}
