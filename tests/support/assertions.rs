//! Invariant checks every adapter result must pass.

use rust_decimal::Decimal;

use apiclient::domain::{Balances, Color, KLine, MakedOrder, OrderBook, Trade, Transfer};

pub fn assert_book(book: &OrderBook, depth: usize) {
    assert!(book.asks.len() <= depth, "asks exceed depth {depth}");
    assert!(book.bids.len() <= depth, "bids exceed depth {depth}");
    assert!(
        book.asks.windows(2).all(|w| w[0].price < w[1].price),
        "asks not strictly ascending: {:?}",
        book.asks
    );
    assert!(
        book.bids.windows(2).all(|w| w[0].price > w[1].price),
        "bids not strictly descending: {:?}",
        book.bids
    );
    if let (Some(ask), Some(bid)) = (book.best_ask(), book.best_bid()) {
        assert!(ask.price > bid.price, "crossed book {ask:?} / {bid:?}");
    }
}

pub fn assert_kline(kline: &KLine, count: usize) {
    assert!(kline.price_candles.len() <= count);
    assert_eq!(kline.price_candles.len(), kline.volume_candles.len());
    assert!(kline.price_candles.windows(2).all(|w| w[0].time < w[1].time));
    for (price, volume) in kline.price_candles.iter().zip(&kline.volume_candles) {
        assert_eq!(price.time, volume.time);
        assert_eq!(volume.color == Color::Green, price.close > price.open);
    }
}

pub fn assert_trades(trades: &[Trade], count: usize) {
    assert!(trades.len() <= count);
    assert!(trades.windows(2).all(|w| w[0].time <= w[1].time));
}

pub fn assert_order(order: &MakedOrder) {
    assert!(order.left_amount_executed >= Decimal::ZERO);
    assert!(order.left_amount_executed <= order.left_amount, "{order:?}");
    assert!(order.right_amount_executed >= Decimal::ZERO);
    assert!(order.right_amount_executed <= order.right_amount, "{order:?}");
}

pub fn assert_balances(balances: &Balances) {
    for (currency, balance) in balances {
        assert_eq!(*currency, currency.to_uppercase());
        assert!(!(balance.free.is_zero() && balance.locked.is_zero()), "{currency} is zero");
    }
}

pub fn assert_transfers(transfers: &[Transfer]) {
    assert!(transfers.windows(2).all(|w| w[0].time <= w[1].time));
}
