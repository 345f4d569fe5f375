//! HTTP client utilities.
//!
//! Builds the single `reqwest` client used for Figma API calls.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::error::{FigjsonError, Result};

/// Default timeout for HTTP requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a configured HTTP client.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn build_client(timeout: Duration) -> Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(format!("figjson/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| FigjsonError::Network(e.to_string()))
}

/// Get or create a default HTTP client.
///
/// # Errors
///
/// Returns error if client construction fails.
pub fn default_client() -> Result<Client> {
    build_client(DEFAULT_TIMEOUT)
}

/// Classify a transport-level `reqwest` failure.
#[must_use]
pub fn classify_send_error(err: &reqwest::Error, timeout: Duration) -> FigjsonError {
    if err.is_timeout() {
        FigjsonError::Timeout(timeout.as_secs())
    } else {
        FigjsonError::Network(err.to_string())
    }
}
