//! Command-line interface definitions.
//!
//! Read-only inspection of an exchange through the uniform client: market
//! data for any listed pair, plus account balances when credentials are set
//! in the environment.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{TradingPair, DEFAULT_DEPTH};

/// Inspect an exchange through the uniform trading API
#[derive(Parser, Debug)]
#[command(name = "apiclient")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults apply when omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List tradable pairs
    Pairs,

    /// Show the last traded price
    Price(SymbolArg),

    /// Show the order book
    Book(BookArgs),

    /// Show candles
    Kline(KlineArgs),

    /// Show recent public trades
    Trades(TradesArgs),

    /// Show 24h market statistics
    Market(SymbolArg),

    /// Show price and amount precision
    Decs(SymbolArg),

    /// Show non-zero account balances (needs credentials)
    Balances,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `apiclient config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate a configuration file for correctness.
    Validate,
}

#[derive(Parser, Debug)]
pub struct SymbolArg {
    /// Pair symbol, e.g. USDT_BTC
    pub symbol: TradingPair,
}

#[derive(Parser, Debug)]
pub struct BookArgs {
    /// Pair symbol, e.g. USDT_BTC
    pub symbol: TradingPair,

    /// Levels per side
    #[arg(long, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,
}

#[derive(Parser, Debug)]
pub struct KlineArgs {
    /// Pair symbol, e.g. USDT_BTC
    pub symbol: TradingPair,

    /// Candle period in minutes
    #[arg(long, default_value_t = 1)]
    pub period: u32,

    /// Number of most recent candles
    #[arg(long, default_value_t = 100)]
    pub count: usize,
}

#[derive(Parser, Debug)]
pub struct TradesArgs {
    /// Pair symbol, e.g. USDT_BTC
    pub symbol: TradingPair,

    /// Number of most recent trades
    #[arg(long, default_value_t = 50)]
    pub count: usize,
}
