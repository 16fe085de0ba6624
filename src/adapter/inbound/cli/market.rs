//! Handlers for the market data commands.

use crate::adapter::inbound::cli::command::{BookArgs, KlineArgs, SymbolArg, TradesArgs};
use crate::adapter::inbound::cli::output;
use crate::domain::{Color, Side};
use crate::error::Result;
use crate::port::outbound::exchange::ApiClient;

/// Execute `pairs`.
pub async fn execute_pairs(client: &dyn ApiClient) -> Result<()> {
    let pairs = client.get_trading_pairs().await?;
    output::data("pairs", &pairs, |pairs| {
        for pair in pairs {
            output::line(pair);
        }
    })?;
    Ok(())
}

/// Execute `price`.
pub async fn execute_price(client: &dyn ApiClient, args: &SymbolArg) -> Result<()> {
    let price = client.get_last_price(&args.symbol).await?;
    output::data("price", &price, |price| {
        output::field(args.symbol.as_str(), price);
    })?;
    Ok(())
}

/// Execute `book`.
pub async fn execute_book(client: &dyn ApiClient, args: &BookArgs) -> Result<()> {
    let book = client.get_order_book(&args.symbol, args.depth).await?;
    output::data("book", &book, |book| {
        output::section("Asks");
        for level in book.asks.iter().rev() {
            output::line(format!("{:>18} {}", output::negative(level.price), level.quantity));
        }
        output::section("Bids");
        for level in &book.bids {
            output::line(format!("{:>18} {}", output::positive(level.price), level.quantity));
        }
        if let Some(spread) = book.spread() {
            output::section("Spread");
            output::line(spread);
        }
    })?;
    Ok(())
}

/// Execute `kline`.
pub async fn execute_kline(client: &dyn ApiClient, args: &KlineArgs) -> Result<()> {
    let kline = client
        .get_kline(&args.symbol, args.period, args.count)
        .await?;
    output::data("kline", &kline, |kline| {
        for (candle, volume) in kline.price_candles.iter().zip(&kline.volume_candles) {
            let close = match volume.color {
                Color::Green => output::positive(candle.close),
                Color::Red => output::negative(candle.close),
            };
            output::line(format!(
                "{} o {} h {} l {} c {} v {}",
                output::muted(candle.time),
                candle.open,
                candle.high,
                candle.low,
                close,
                volume.value
            ));
        }
    })?;
    Ok(())
}

/// Execute `trades`.
pub async fn execute_trades(client: &dyn ApiClient, args: &TradesArgs) -> Result<()> {
    let trades = client.get_trade_history(&args.symbol, args.count).await?;
    output::data("trades", &trades, |trades| {
        for trade in trades {
            let side = match trade.side {
                Side::Buy => output::positive(trade.side),
                Side::Sell => output::negative(trade.side),
            };
            output::line(format!(
                "{} {} {} @ {}",
                output::muted(trade.time),
                side,
                trade.amount,
                trade.price
            ));
        }
    })?;
    Ok(())
}

/// Execute `market`.
pub async fn execute_market(client: &dyn ApiClient, args: &SymbolArg) -> Result<()> {
    let data = client.get_market_data(&args.symbol).await?;
    output::data("market", &data, |data| {
        output::section(args.symbol.as_str());
        output::field("Price", data.price);
        output::field("Change", format!("{} ({}%)", data.price_change_abs, data.price_change_perc));
        output::field("Best ask", data.min_sell);
        output::field("Best bid", data.max_buy);
        output::field("Spread %", data.spread_perc);
        output::field("24h high", data.day_price_high);
        output::field("24h low", data.day_price_low);
        output::field("Volume quote", data.volume_left);
        output::field("Volume base", data.volume_right);
    })?;
    Ok(())
}

/// Execute `decs`.
pub async fn execute_decs(client: &dyn ApiClient, args: &SymbolArg) -> Result<()> {
    let decs = client.get_decs(&args.symbol).await?;
    output::data("decs", &decs, |decs| {
        output::field("Price decs", decs.price_decs);
        output::field("Amount decs", decs.amount_decs);
    })?;
    Ok(())
}
