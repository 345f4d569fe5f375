//! Access token persistence.
//!
//! A single slot under [`TOKEN_KEY`] in any [`KeyValueStore`]. The token is
//! treated as an opaque string; the only rule is that an empty token is never
//! written.

use super::kv::KeyValueStore;
use crate::error::{FigjsonError, Result};

/// Storage key for the personal access token.
pub const TOKEN_KEY: &str = "figmaToken";

/// Token slot backed by a key-value store.
pub struct TokenStore<S> {
    store: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Backend name, for messages.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Read the saved token. Nothing saved yields an empty string.
    ///
    /// # Errors
    /// Returns a storage error if the backend cannot be read.
    pub fn load(&self) -> Result<String> {
        let token = self.store.get(TOKEN_KEY)?.unwrap_or_default();
        tracing::debug!(backend = self.backend_name(), present = !token.is_empty(), "Loaded token");
        Ok(token)
    }

    /// Persist `token`, replacing any previous one.
    ///
    /// # Errors
    /// Returns [`FigjsonError::MissingInput`] for an empty token, or a storage
    /// error if the backend cannot be written.
    pub fn save(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(FigjsonError::MissingInput("access token is empty".to_string()));
        }
        self.store.set(TOKEN_KEY, token)?;
        tracing::info!(backend = self.backend_name(), "Token saved");
        Ok(())
    }

    /// Remove the saved token. Succeeds when nothing is saved.
    ///
    /// # Errors
    /// Returns a storage error if the backend cannot be written.
    pub fn delete(&self) -> Result<()> {
        self.store.delete(TOKEN_KEY)?;
        tracing::info!(backend = self.backend_name(), "Token deleted");
        Ok(())
    }
}
