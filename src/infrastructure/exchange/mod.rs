//! Exchange wiring.
//!
//! ## Adding a New Exchange
//!
//! 1. Create an adapter under `adapter/outbound/<name>/` implementing
//!    [`crate::port::outbound::exchange::ApiClient`]
//! 2. Add its settings as a variant of
//!    [`ExchangeSpecificConfig`](crate::infrastructure::config::settings::ExchangeSpecificConfig)
//! 3. Add a branch to [`ExchangeFactory`]

mod factory;

pub use factory::ExchangeFactory;
