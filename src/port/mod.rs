//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!     ┌──────────────────────────┐
//!     │  Calling code (bots,     │
//!     │  dashboards, settlement) │
//!     └────────────┬─────────────┘
//!                  │ dyn ApiClient
//!                  ▼
//!     ┌──────────────────────────┐
//!     │  Normalized<C>  (guard)  │
//!     └────────────┬─────────────┘
//!                  ▼
//!     ┌──────────────────────────┐
//!     │  Exchange adapter        │
//!     │  (paper, venue-specific) │
//!     └──────────────────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`outbound::exchange::ApiClient`] - the capability contract every
//!   exchange adapter implements

pub mod outbound;
