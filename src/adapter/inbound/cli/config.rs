//! Handler for the `config` command group.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Load the file at `path`, or defaults when no path was given.
///
/// # Errors
///
/// Returns a configuration error if the file is unreadable or invalid.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::parse_toml(""),
    }
}

/// Execute `config validate`.
pub fn execute_validate(path: Option<&Path>) -> Result<()> {
    let path = path.ok_or(ConfigError::MissingField { field: "--config" })?;
    let config = Config::load(path)?;

    output::section("Config Validation");
    output::success("Config file is valid");
    if !output::is_json() {
        output::field("Path", path.display());
        output::field("Exchange", config.exchange);
        output::field("Log level", &config.logging.level);
    }
    Ok(())
}
