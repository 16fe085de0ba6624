//! Contract tests: every operation of the uniform client against the
//! guarded paper adapter.

mod support;

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use apiclient::adapter::outbound::normalized::Normalized;
use apiclient::adapter::outbound::paper::{Operation, PaperClient, PaperConfig};
use apiclient::domain::{HistoryPeriod, Side, Status, TradingPair};
use apiclient::error::{ConfigError, Error, ErrorKind};
use apiclient::port::outbound::exchange::ApiClient;
use apiclient::testkit::domain::pair;
use apiclient::testkit::paper::{credentials, guarded_client, paper_config, START};

use support::assertions::*;

async fn ready(config: &PaperConfig) -> Normalized<PaperClient> {
    let client = guarded_client(config);
    client.init(credentials()).await.unwrap();
    client
}

#[tokio::test]
async fn order_book_depth_five_is_sorted_and_uncrossed() {
    let client = ready(&paper_config()).await;
    let book = client.get_order_book(&pair("USDT_BTC"), 5).await.unwrap();

    assert_book(&book, 5);
    assert_eq!(book.asks.len(), 5);
    assert_eq!(book.bids.len(), 5);
    assert_eq!(book.best_ask().unwrap().price, dec!(101));
    assert_eq!(book.best_bid().unwrap().price, dec!(99));
}

#[tokio::test]
async fn default_depth_is_fifty() {
    let client = ready(&paper_config()).await;
    let book = client.get_order_book_default(&pair("USDT_BTC")).await.unwrap();
    assert_book(&book, 50);
    assert_eq!(book.asks.len(), 20);
}

#[tokio::test]
async fn resting_orders_at_one_price_merge_into_one_level() {
    let client = ready(&paper_config()).await;
    let symbol = pair("USDT_BTC");
    client.buy(&symbol, dec!(0.5), dec!(99), false).await.unwrap();
    client.buy(&symbol, dec!(0.25), dec!(99), false).await.unwrap();

    let book = client.get_order_book(&symbol, 5).await.unwrap();
    assert_book(&book, 5);
    assert_eq!(book.bids[0].price, dec!(99));
    assert_eq!(book.bids[0].quantity, dec!(1.75));
}

#[tokio::test]
async fn checked_buy_resolves_status() {
    let client = ready(&paper_config()).await;
    let order = client
        .buy(&pair("USDT_BTC"), dec!(0.01), dec!(50000), true)
        .await
        .unwrap();

    assert_ne!(order.status, Status::Undefined);
    assert_eq!(order.status, Status::Filled);
    assert_eq!(order.side, Side::Buy);
    assert_eq!(order.right_amount_executed, dec!(0.01));
    assert_eq!(order.rate_executed, dec!(101));
    assert_order(&order);
}

#[tokio::test]
async fn unchecked_sell_returns_acknowledgment() {
    let client = ready(&paper_config()).await;
    let order = client
        .sell(&pair("USDT_BTC"), dec!(1), dec!(150), false)
        .await
        .unwrap();

    assert_eq!(order.status, Status::Undefined);
    assert_eq!(order.time, START);
    assert_eq!(order.left_amount, dec!(150));
    assert_order(&order);

    let resolved = client
        .get_order_status(&order.id, &pair("USDT_BTC"))
        .await
        .unwrap();
    assert_eq!(resolved.status, Status::NotFilled);
}

#[tokio::test]
async fn place_dispatches_on_side() {
    let client = ready(&paper_config()).await;
    let order = client
        .place(Side::Sell, &pair("USDT_BTC"), dec!(0.1), dec!(99), true)
        .await
        .unwrap();
    assert_eq!(order.side, Side::Sell);
    assert_eq!(order.status, Status::Filled);
}

#[tokio::test]
async fn partial_fill_keeps_executed_within_bounds() {
    let client = ready(&paper_config()).await;
    // House liquidity is one unit per level: 101 and 102 fill, the rest rests.
    let order = client
        .buy(&pair("USDT_BTC"), dec!(3), dec!(102), true)
        .await
        .unwrap();

    assert_eq!(order.status, Status::PartiallyFilled);
    assert_eq!(order.right_amount_executed, dec!(2));
    assert_eq!(order.left_amount_executed, dec!(203));
    assert_eq!(order.left_amount, dec!(305));
    assert_order(&order);

    let open = client
        .get_my_open_orders(Some(&pair("USDT_BTC")))
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, order.id);
}

#[tokio::test]
async fn unresolved_placement_carries_the_order() {
    let client = ready(&paper_config()).await;
    client.inner().venue().fail_next(Operation::OrderStatus);

    let err = client
        .buy(&pair("USDT_BTC"), dec!(0.5), dec!(90), true)
        .await
        .unwrap_err();

    let order = err.partial_order().expect("order carried");
    assert_eq!(order.status, Status::Undefined);
    assert_eq!(err.kind(), ErrorKind::Remote);
    assert!(!err.is_retryable());

    let open = client.get_my_open_orders(None).await.unwrap();
    assert_eq!(open[0].id, order.id);
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let client = ready(&paper_config()).await;
    let err = client
        .get_order_status("nonexistent-id", &pair("USDT_BTC"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!err.is_retryable());

    let err = client
        .cancel_order(&pair("USDT_BTC"), "nonexistent-id")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn cancel_all_without_pair_is_unsupported() {
    let client = ready(&paper_config()).await;
    let err = client.cancel_all(None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
    assert!(matches!(err, Error::Unsupported(_)));
}

#[tokio::test]
async fn cancel_all_across_pairs_when_supported() {
    let config = PaperConfig {
        supports_cancel_all_pairs: true,
        ..paper_config()
    };
    let client = ready(&config).await;
    client.buy(&pair("USDT_BTC"), dec!(1), dec!(90), false).await.unwrap();
    client.buy(&pair("USDT_ETH"), dec!(1), dec!(5), false).await.unwrap();
    assert_eq!(client.get_my_open_orders(None).await.unwrap().len(), 2);

    client.cancel_all(None).await.unwrap();
    assert!(client.get_my_open_orders(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn cancel_releases_funds() {
    let client = ready(&paper_config()).await;
    let symbol = pair("USDT_BTC");
    let order = client.buy(&symbol, dec!(10), dec!(50), false).await.unwrap();

    let usdt = client.get_balances().await.unwrap()["USDT"];
    assert_eq!(usdt.locked, dec!(500));

    client.cancel_order(&symbol, &order.id).await.unwrap();
    let usdt = client.get_balances().await.unwrap()["USDT"];
    assert_eq!(usdt.locked, Decimal::ZERO);
    assert_eq!(usdt.free, dec!(10000));

    client.cancel_all(Some(&symbol)).await.unwrap();
    let status = client.get_order_status(&order.id, &symbol).await.unwrap();
    assert_eq!(status.status, Status::NotFilled);
}

#[tokio::test]
async fn balances_are_uppercase_and_non_zero() {
    let client = ready(&paper_config()).await;
    // Selling the whole BTC balance leaves a zero entry at the venue.
    client
        .sell(&pair("USDT_BTC"), dec!(10), dec!(1), false)
        .await
        .unwrap();

    let balances = client.get_balances().await.unwrap();
    assert_balances(&balances);
    assert!(!balances.contains_key("BTC"));
    assert!(balances.contains_key("USDT"));
}

#[tokio::test]
async fn private_calls_need_init() {
    let client = guarded_client(&paper_config());
    let err = client.get_balances().await.unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::NotInitialized)));
    assert_eq!(err.kind(), ErrorKind::Configuration);

    // Public data needs no credentials.
    assert!(client.get_last_price(&pair("USDT_BTC")).await.is_ok());
}

#[tokio::test]
async fn init_is_idempotent() {
    let client = guarded_client(&paper_config());
    client.init(credentials()).await.unwrap();
    client.init(credentials()).await.unwrap();
    assert!(client.get_balances().await.is_ok());
}

#[tokio::test]
async fn kline_is_ordered_colored_and_bounded() {
    let client = ready(&paper_config()).await;
    let kline = client.get_kline(&pair("USDT_BTC"), 5, 10).await.unwrap();

    assert_kline(&kline, 10);
    assert_eq!(kline.len(), 10);
    assert_eq!(kline.price_candles.last().unwrap().time % 300, 0);
}

#[tokio::test]
async fn kline_rejects_unsupported_period() {
    let client = ready(&paper_config()).await;
    let err = client.get_kline(&pair("USDT_BTC"), 7, 10).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

#[tokio::test]
async fn zero_depth_or_count_is_invalid() {
    let client = ready(&paper_config()).await;
    let symbol = pair("USDT_BTC");
    assert_eq!(
        client.get_order_book(&symbol, 0).await.unwrap_err().kind(),
        ErrorKind::InvalidParameter
    );
    assert_eq!(
        client.get_trade_history(&symbol, 0).await.unwrap_err().kind(),
        ErrorKind::InvalidParameter
    );
}

#[tokio::test]
async fn trade_history_is_ascending_and_sided() {
    let client = ready(&paper_config()).await;
    let symbol = pair("USDT_BTC");
    client.buy(&symbol, dec!(1), dec!(101), false).await.unwrap();

    let trades = client.get_trade_history(&symbol, 5).await.unwrap();
    assert_trades(&trades, 5);
    assert_eq!(trades.len(), 5);

    let last = trades.last().unwrap();
    assert_eq!(last.side, Side::Buy);
    assert_eq!(last.price, dec!(101));
    assert_eq!(last.time, START);
}

#[tokio::test]
async fn unsided_prints_take_side_from_tick_direction() {
    let client = ready(&paper_config()).await;
    let symbol = pair("USDT_BTC");
    let venue = client.inner().venue();
    for (offset, price) in [(10, dec!(105)), (20, dec!(103)), (30, dec!(103)), (40, dec!(104))] {
        venue
            .record_trade(symbol.as_str(), price, dec!(1), None, Some(START + offset))
            .unwrap();
    }

    let trades = client.get_trade_history(&symbol, 3).await.unwrap();
    assert_trades(&trades, 3);
    let sides: Vec<_> = trades.iter().map(|t| (t.time, t.side)).collect();
    assert_eq!(
        sides,
        vec![
            (START + 20, Side::Sell),
            (START + 30, Side::Sell),
            (START + 40, Side::Buy),
        ]
    );
}

#[tokio::test]
async fn oversized_order_is_rejected_without_locking_funds() {
    let client = ready(&paper_config()).await;
    let err = client
        .buy(&pair("USDT_BTC"), Decimal::MAX / dec!(2), dec!(100), false)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);

    let usdt = client.get_balances().await.unwrap()["USDT"];
    assert_eq!(usdt.free, dec!(10000));
    assert!(usdt.locked.is_zero());
}

#[tokio::test]
async fn market_data_matches_book_and_tape() {
    let client = ready(&paper_config()).await;
    let data = client.get_market_data(&pair("USDT_BTC")).await.unwrap();

    assert_eq!(data.price, dec!(100));
    assert_eq!(data.min_sell, dec!(101));
    assert_eq!(data.max_buy, dec!(99));
    assert_eq!(data.day_price_high, dec!(102));
    assert_eq!(data.day_price_low, dec!(98));
    assert_eq!(data.volume_right, dec!(240));
    assert_eq!(data.spread_perc, (dec!(2) / dec!(101) * dec!(100)).round_dp(8));
}

#[tokio::test]
async fn listed_pairs_round_trip() {
    let client = ready(&paper_config()).await;
    let pairs = client.get_trading_pairs().await.unwrap();
    assert_eq!(pairs.len(), 2);

    for symbol in &pairs {
        let reparsed: TradingPair = symbol.to_string().parse().unwrap();
        assert_eq!(&reparsed, symbol);
        client.get_decs(symbol).await.unwrap();
        client.get_last_price(symbol).await.unwrap();
    }
}

#[tokio::test]
async fn decimals_follow_tick_and_step() {
    let client = ready(&paper_config()).await;
    let decs = client.get_decs(&pair("USDT_ETH")).await.unwrap();
    assert_eq!(decs.price_decs, 2);
    assert_eq!(decs.amount_decs, 3);
}

#[tokio::test]
async fn unknown_symbol_is_invalid_parameter() {
    let client = ready(&paper_config()).await;
    let err = client.get_last_price(&pair("USDT_DOGE")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
}

#[tokio::test]
async fn transport_failures_are_retryable() {
    let client = guarded_client(&paper_config());
    client.inner().venue().fail_next(Operation::Depth);

    let err = client.get_order_book(&pair("USDT_BTC"), 5).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Remote);
    assert!(err.is_retryable());
    assert!(client.get_order_book(&pair("USDT_BTC"), 5).await.is_ok());
}

#[tokio::test]
async fn histories_respect_period() {
    let client = ready(&paper_config()).await;
    let venue = client.inner().venue().clone();
    let symbol = pair("USDT_BTC");

    let old = client.buy(&symbol, dec!(1), dec!(101), true).await.unwrap();
    venue.advance(2 * 86_400);
    let recent = client.buy(&symbol, dec!(1), dec!(90), true).await.unwrap();

    let day = client
        .get_my_order_history(Some(&symbol), HistoryPeriod::Day)
        .await
        .unwrap();
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].id, recent.id);

    let week = client
        .get_my_order_history(None, HistoryPeriod::Week)
        .await
        .unwrap();
    assert_eq!(week.len(), 2);

    let fills = client
        .get_my_trade_history(Some(&symbol), HistoryPeriod::Month)
        .await
        .unwrap();
    assert_eq!(fills.len(), 1);
    assert_eq!(fills[0].id, old.id);
    fills.iter().for_each(assert_order);
}

#[tokio::test]
async fn withdraw_and_transfer_lists() {
    let config = PaperConfig {
        withdraw_chain_required: true,
        withdraw_fee: dec!(1),
        ..paper_config()
    };
    let client = ready(&config).await;

    let err = client
        .withdraw("usdt", "addr-1", dec!(100), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidParameter {
            parameter: "chain",
            ..
        }
    ));

    client.inner().venue().advance(60);
    let id = client
        .withdraw("usdt", "addr-1", dec!(100), Some("TRC20"))
        .await
        .unwrap();
    assert_eq!(client.get_balances().await.unwrap()["USDT"].free, dec!(9899));

    let withdrawals = client.get_withdraw_list().await.unwrap();
    assert_transfers(&withdrawals);
    assert_eq!(withdrawals.len(), 1);
    assert_eq!(withdrawals[0].txid, id);
    assert_eq!(withdrawals[0].currency, "USDT");
    assert_eq!(withdrawals[0].time, START + 60);

    let deposits = client.get_deposit_list().await.unwrap();
    assert_transfers(&deposits);
    assert_eq!(deposits.len(), 2);
    assert!(deposits.iter().all(|d| d.time == START));
}

#[tokio::test]
async fn shared_across_tasks() {
    let client: Arc<dyn ApiClient> = Arc::new(ready(&paper_config()).await);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .buy(&pair("USDT_BTC"), dec!(0.1), dec!(90) - Decimal::from(i), true)
                    .await
            })
        })
        .collect();

    for handle in handles {
        let order = handle.await.unwrap().unwrap();
        assert_eq!(order.status, Status::NotFilled);
    }
    assert_eq!(client.get_my_open_orders(None).await.unwrap().len(), 4);
}
