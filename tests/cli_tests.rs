//! CLI integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use apiclient::infrastructure::config::settings::{ENV_ACCOUNT_ID, ENV_API_KEY, ENV_API_SECRET};

use support::config::{write_temp_config, PAPER_CONFIG};

fn apiclient() -> Command {
    let mut cmd = cargo_bin_cmd!("apiclient");
    cmd.env_remove(ENV_ACCOUNT_ID)
        .env_remove(ENV_API_KEY)
        .env_remove(ENV_API_SECRET);
    cmd
}

#[test]
fn test_help() {
    apiclient()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("apiclient"))
        .stdout(predicate::str::contains("book"))
        .stdout(predicate::str::contains("kline"))
        .stdout(predicate::str::contains("balances"));
}

#[test]
fn test_version() {
    apiclient()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("apiclient"));
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let file = write_temp_config(&PAPER_CONFIG.replace("fee_rate = 0.001", "fee_rate = 2"));
    apiclient()
        .args(["config", "validate", "--config"])
        .arg(&file.path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exchange_config.fee_rate"));
}

#[test]
fn config_validate_accepts_valid_file() {
    let file = write_temp_config(PAPER_CONFIG);
    apiclient()
        .args(["config", "validate", "--config"])
        .arg(&file.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Config file is valid"));
}

#[test]
fn config_validate_requires_path() {
    apiclient()
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--config"));
}

#[test]
fn pairs_json_lines() {
    let file = write_temp_config(PAPER_CONFIG);
    apiclient()
        .args(["pairs", "--json", "--config"])
        .arg(&file.path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type":"pairs""#))
        .stdout(predicate::str::contains("USDT_BTC"));
}

#[test]
fn price_uses_defaults_without_config() {
    apiclient()
        .args(["price", "USDT_BTC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("USDT_BTC"))
        .stdout(predicate::str::contains("30000"));
}

#[test]
fn book_prints_both_sides() {
    let file = write_temp_config(PAPER_CONFIG);
    apiclient()
        .args(["book", "USDT_BTC", "--depth", "3", "--config"])
        .arg(&file.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Asks"))
        .stdout(predicate::str::contains("Bids"))
        .stdout(predicate::str::contains("101"));
}

#[test]
fn book_rejects_zero_depth() {
    apiclient()
        .args(["book", "USDT_BTC", "--depth", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("depth must be greater than zero"));
}

#[test]
fn kline_rejects_unsupported_period() {
    apiclient()
        .args(["kline", "USDT_BTC", "--period", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported candle period"));
}

#[test]
fn unknown_symbol_fails() {
    apiclient()
        .args(["decs", "USDT_DOGE"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("USDT_DOGE"));
}

#[test]
fn malformed_symbol_is_a_usage_error() {
    apiclient()
        .args(["price", "BTCUSDT"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("separator"));
}

#[test]
fn balances_require_credentials() {
    apiclient()
        .arg("balances")
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_key"));
}

#[test]
fn balances_with_credentials() {
    let file = write_temp_config(PAPER_CONFIG);
    apiclient()
        .env(ENV_API_KEY, "key")
        .env(ENV_API_SECRET, "secret")
        .args(["balances", "--json", "--config"])
        .arg(&file.path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type":"balances""#))
        .stdout(predicate::str::contains("USDT"));
}
