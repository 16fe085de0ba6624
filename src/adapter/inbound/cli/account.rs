//! Handlers for account commands.

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::port::outbound::exchange::{ApiClient, Credentials};

/// Execute `balances`.
pub async fn execute_balances(client: &dyn ApiClient, credentials: Credentials) -> Result<()> {
    client.init(credentials).await?;
    let balances = client.get_balances().await?;
    output::data("balances", &balances, |balances| {
        if balances.is_empty() {
            output::line(output::muted("(no balances)"));
        }
        for (currency, balance) in balances {
            output::line(format!(
                "{currency:<8} free {} locked {}",
                balance.free, balance.locked
            ));
        }
    })?;
    Ok(())
}
