//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Builders for pairs and orders.
//! - [`paper`] - Canonical paper venue settings and ready-to-use clients.

pub mod domain;
pub mod paper;
