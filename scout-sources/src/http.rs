//! Shared HTTP client for provider requests.
//!
//! Provides a [`reqwest::Client`] with the configured timeout and a fixed
//! User-Agent identifying this crate.

use std::time::Duration;

use crate::config::PlacesConfig;
use crate::error::SourceError;

/// User-Agent sent with every provider request.
pub const USER_AGENT: &str = concat!("scout-sources/", env!("CARGO_PKG_VERSION"));

/// Build a [`reqwest::Client`] for provider API calls.
///
/// The client has:
/// - Request timeout from config (covers connect, send and body read)
/// - gzip decompression
/// - No redirects; the provider API never redirects
///
/// # Errors
///
/// Returns [`SourceError::Configuration`] if the client cannot be constructed.
pub fn build_client(config: &PlacesConfig) -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| SourceError::Configuration(format!("failed to build HTTP client: {e}")))
}
