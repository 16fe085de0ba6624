//! CLI module graph and dispatch.

pub mod account;
pub mod command;
pub mod config;
pub mod market;
pub mod output;

use command::{Cli, Commands, ConfigCommand};

use crate::error::Result;
use crate::infrastructure::exchange::ExchangeFactory;

/// Run a parsed command line to completion.
///
/// # Errors
///
/// Returns the first configuration, parameter or exchange error.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json));
    let path = cli.config.as_deref();

    if let Commands::Config(ConfigCommand::Validate) = cli.command {
        return config::execute_validate(path);
    }

    let config = config::load(path)?;
    config.init_logging();
    let client = ExchangeFactory::create_client(&config)?;
    let client = client.as_ref();

    match cli.command {
        Commands::Pairs => market::execute_pairs(client).await,
        Commands::Price(args) => market::execute_price(client, &args).await,
        Commands::Book(args) => market::execute_book(client, &args).await,
        Commands::Kline(args) => market::execute_kline(client, &args).await,
        Commands::Trades(args) => market::execute_trades(client, &args).await,
        Commands::Market(args) => market::execute_market(client, &args).await,
        Commands::Decs(args) => market::execute_decs(client, &args).await,
        Commands::Balances => account::execute_balances(client, config.credentials.clone()).await,
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(path),
    }
}
