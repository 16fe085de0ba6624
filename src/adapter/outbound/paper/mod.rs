//! Paper trading adapter.
//!
//! An in-process simulated venue behind the full [`ApiClient`] contract.
//! Useful for dry runs and as the reference adapter the test-suite runs
//! the contract against.
//!
//! [`ApiClient`]: crate::port::outbound::exchange::ApiClient

mod client;
mod settings;
mod venue;

pub use client::PaperClient;
pub use settings::{PaperConfig, PaperMarketConfig};
pub use venue::{
    Clock, NativeDepth, NativeLevel, NativeOrder, NativeTicker, NativeTransfer, Operation,
    OrderFilter, PaperVenue,
};
