//! Credential holder shared by adapters.
//!
//! Written once by `init`, read by every private call. Reads vastly
//! outnumber writes, so a `parking_lot::RwLock` guards it.

use parking_lot::RwLock;
use tracing::info;

use crate::error::{ConfigError, Result};
use crate::port::outbound::exchange::Credentials;

#[derive(Debug, Default)]
pub struct Session {
    credentials: RwLock<Option<Credentials>>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store credentials. Same credentials again is a no-op;
    /// different ones replace the old set.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a required field is empty.
    pub fn init(
        &self,
        exchange: &'static str,
        credentials: Credentials,
        account_required: bool,
    ) -> Result<()> {
        credentials.validate(account_required)?;

        let mut current = self.credentials.write();
        match current.as_ref() {
            Some(existing) if *existing == credentials => {}
            Some(_) => {
                info!(exchange, "Replacing API credentials");
                *current = Some(credentials);
            }
            None => {
                info!(exchange, "API credentials initialized");
                *current = Some(credentials);
            }
        }
        Ok(())
    }

    /// Credentials for a private call.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotInitialized`] before a successful `init`.
    pub fn credentials(&self) -> Result<Credentials> {
        self.credentials
            .read()
            .clone()
            .ok_or_else(|| ConfigError::NotInitialized.into())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.credentials.read().is_some()
    }
}
