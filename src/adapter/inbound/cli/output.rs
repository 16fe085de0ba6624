//! CLI output formatting.
//!
//! Commands either print a compact text rendering or, with `--json`, one
//! JSON line per result of the form `{"type": ..., "payload": ...}` for
//! scripting.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde::Serialize;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool) -> Self {
        Self { json }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Print a command result: as a JSON line in JSON mode, otherwise through
/// `render`.
///
/// # Errors
///
/// Returns a serialization error if `value` cannot be encoded.
pub fn data<T: Serialize>(kind: &str, value: &T, render: impl FnOnce(&T)) -> serde_json::Result<()> {
    if is_json() {
        emit_json_line(kind, serde_json::to_value(value)?);
    } else {
        render(value);
    }
    Ok(())
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    println!("  {:<14} {}", label.dimmed(), value);
}

/// Print a plain indented line.
pub fn line(text: impl Display) {
    println!("  {text}");
}

/// Print a section header.
pub fn section(title: &str) {
    if is_json() {
        return;
    }
    println!();
    println!("{}", title.bold());
}

/// Print a success line.
pub fn success(message: &str) {
    if is_json() {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

/// Format a value in green.
pub fn positive(value: impl Display) -> String {
    format!("{}", value.to_string().green())
}

/// Format a value in red.
pub fn negative(value: impl Display) -> String {
    format!("{}", value.to_string().red())
}

/// Format a dimmed value.
pub fn muted(value: impl Display) -> String {
    format!("{}", value.to_string().dimmed())
}
