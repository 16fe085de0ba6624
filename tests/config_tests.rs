mod support;

use rust_decimal_macros::dec;

use apiclient::error::{ConfigError, Error};
use apiclient::infrastructure::config::settings::{Config, Exchange};
use apiclient::infrastructure::exchange::ExchangeFactory;
use apiclient::port::outbound::exchange::ApiClient;
use apiclient::testkit::domain::pair;

use support::config::{write_temp_config, PAPER_CONFIG};

#[test]
fn config_loads_paper_settings() {
    let file = write_temp_config(PAPER_CONFIG);
    let config = Config::load(&file.path).expect("valid config");

    assert_eq!(config.exchange, Exchange::Paper);
    assert_eq!(config.logging.level, "warn");

    let paper = config.paper_config().expect("paper settings");
    assert_eq!(paper.fee_rate, dec!(0.001));
    assert_eq!(paper.markets.len(), 1);
    assert_eq!(paper.markets[0].spacing(), dec!(1));
    assert_eq!(paper.markets[0].history_minutes, 120);
    assert_eq!(paper.initial_balances.get("USDT"), Some(&dec!(1000)));
}

#[test]
fn shipped_example_config_is_valid() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).expect("example config");
    let paper = config.paper_config().expect("paper settings");
    assert_eq!(paper.markets.len(), 2);
    assert_eq!(paper.candle_periods.len(), 7);
}

#[test]
fn config_rejects_lowercase_symbol() {
    let file = write_temp_config(&PAPER_CONFIG.replace("USDT_BTC", "usdt_btc"));
    let result = Config::load(&file.path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "exchange_config.markets.symbol",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid symbol error, got {err}"),
        Ok(_) => panic!("Expected lowercase symbol to be rejected"),
    }
}

#[test]
fn config_rejects_malformed_symbol() {
    let file = write_temp_config(&PAPER_CONFIG.replace("USDT_BTC", "USDTBTC"));
    assert!(matches!(
        Config::load(&file.path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "exchange_config.markets.symbol",
            ..
        }))
    ));
}

#[test]
fn config_rejects_fee_rate_out_of_range() {
    let file = write_temp_config(&PAPER_CONFIG.replace("fee_rate = 0.001", "fee_rate = 1.5"));
    let result = Config::load(&file.path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "exchange_config.fee_rate",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid fee rate error, got {err}"),
        Ok(config) => panic!(
            "Expected fee rate to be rejected, got {:?}",
            config.paper_config().map(|p| p.fee_rate)
        ),
    }
}

#[test]
fn config_rejects_zero_tick_size() {
    let file = write_temp_config(&PAPER_CONFIG.replace("tick_size = 0.01", "tick_size = 0"));
    assert!(matches!(
        Config::load(&file.path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "exchange_config.markets.tick_size",
            ..
        }))
    ));
}

#[test]
fn config_rejects_negative_initial_balance() {
    let file = write_temp_config(&PAPER_CONFIG.replace("USDT = 1000", "USDT = -5"));
    assert!(matches!(
        Config::load(&file.path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "exchange_config.initial_balances",
            ..
        }))
    ));
}

#[test]
fn config_rejects_unknown_log_level_format() {
    let file = write_temp_config(&PAPER_CONFIG.replace("format = \"pretty\"", "format = \"yaml\""));
    assert!(matches!(
        Config::load(&file.path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "logging.format",
            ..
        }))
    ));
}

#[test]
fn config_rejects_unknown_exchange() {
    let file = write_temp_config(&PAPER_CONFIG.replace("exchange = \"paper\"", "exchange = \"kraken\""));
    assert!(matches!(
        Config::load(&file.path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn config_missing_file_is_read_error() {
    let file = write_temp_config(PAPER_CONFIG);
    let missing = file.path.with_file_name("absent.toml");
    assert!(matches!(
        Config::load(&missing),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn factory_builds_client_from_loaded_config() {
    let file = write_temp_config(PAPER_CONFIG);
    let config = Config::load(&file.path).expect("valid config");

    let client = ExchangeFactory::create_client(&config).expect("client");
    assert_eq!(client.exchange_name(), "paper");

    tokio_test::block_on(async {
        let pairs = client.get_trading_pairs().await.unwrap();
        assert_eq!(pairs, vec![pair("USDT_BTC")]);

        let book = client.get_order_book(&pair("USDT_BTC"), 3).await.unwrap();
        assert_eq!(book.best_ask().unwrap().price, dec!(101));
        assert_eq!(book.best_bid().unwrap().price, dec!(99));
    });
}
