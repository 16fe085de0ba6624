//! Temporary config files.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A config file that lives as long as the returned guard.
pub struct TempConfig {
    _dir: TempDir,
    pub path: PathBuf,
}

pub fn write_temp_config(contents: &str) -> TempConfig {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    TempConfig { _dir: dir, path }
}

pub const PAPER_CONFIG: &str = r#"
exchange = "paper"

[exchange_config]
type = "paper"
fee_rate = 0.001

[[exchange_config.markets]]
symbol = "USDT_BTC"
tick_size = 0.01
step_size = 0.0001
last_price = 100
seed_levels = 5
seed_spacing = 1

[exchange_config.initial_balances]
USDT = 1000

[logging]
level = "warn"
format = "pretty"
"#;
