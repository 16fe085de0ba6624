//! Infrastructure layer.
//!
//! Technical concerns that support the adapters without containing trading
//! semantics.
//!
//! # Submodules
//!
//! - [`config`] - Configuration loading, validation and logging setup
//! - [`exchange`] - Exchange client factory

pub mod config;
pub mod exchange;
