//! Exchange client factory.
//!
//! Provides [`ExchangeFactory`] for creating the configured adapter. Every
//! client it hands out is wrapped in the normalization guard, so calling
//! code sees the same invariants whichever venue is behind it.

use std::sync::Arc;

use crate::adapter::outbound::normalized::Normalized;
use crate::adapter::outbound::paper::PaperClient;
use crate::error::Result;
use crate::infrastructure::config::settings::{Config, ExchangeSpecificConfig};
use crate::port::outbound::exchange::ApiClient;

/// Factory for creating exchange clients.
///
/// All factory methods are static; no instance state is required.
pub struct ExchangeFactory;

impl ExchangeFactory {
    /// Create a client for the configured exchange.
    ///
    /// The client is not initialized; call
    /// [`ApiClient::init`] before private operations.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the exchange settings are invalid.
    pub fn create_client(config: &Config) -> Result<Box<dyn ApiClient>> {
        match &config.exchange_config {
            ExchangeSpecificConfig::Paper(paper) => {
                let client = PaperClient::new(paper)?;
                Ok(Box::new(Normalized::new(client)))
            }
        }
    }

    /// [`ExchangeFactory::create_client`] for sharing across tasks.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the exchange settings are invalid.
    pub fn create_shared(config: &Config) -> Result<Arc<dyn ApiClient>> {
        Self::create_client(config).map(Arc::from)
    }

    /// Create a client and initialize it with the credentials from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the settings are invalid or a
    /// required credential is missing.
    pub async fn create_authenticated(config: &Config) -> Result<Box<dyn ApiClient>> {
        let client = Self::create_client(config)?;
        client.init(config.credentials.clone()).await?;
        Ok(client)
    }
}
