//! Outbound adapters (driven side): exchange implementations of
//! [`ApiClient`](crate::port::outbound::exchange::ApiClient) and the
//! decorators that wrap them.

pub mod normalized;
pub mod paper;
pub mod session;
