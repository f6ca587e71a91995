//! Places adapter configuration with sensible defaults.
//!
//! [`PlacesConfig`] carries the provider credential, endpoint and timeout.
//! It is built once by the caller and handed to the adapter; nothing in
//! this crate reads the process environment. A caller that needs the key
//! looked up per search pairs this config with an
//! [`ApiKeySource`](crate::credentials::ApiKeySource).

use serde::Deserialize;
use url::Url;

use crate::error::SourceError;

/// Default places provider origin.
pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com";

/// Configuration for the places text-search adapter.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct PlacesConfig {
    /// Provider API key. `None` makes every search fail with
    /// [`SourceError::Configuration`].
    pub api_key: Option<String>,
    /// Provider origin. Overridden in tests to point at a mock server.
    pub base_url: String,
    /// HTTP request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_PLACES_BASE_URL.to_owned(),
            timeout_seconds: 10,
        }
    }
}

// Hand-written so the key never reaches a log line.
impl std::fmt::Debug for PlacesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlacesConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl PlacesConfig {
    /// Create a config with the given API key and default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// The API key, if one is configured and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Validates this configuration.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - `base_url` must be an absolute URL
    ///
    /// A missing API key is not a validation error; it is reported per
    /// search so that the remaining sources keep working.
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.timeout_seconds == 0 {
            return Err(SourceError::Configuration(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        Url::parse(&self.base_url).map_err(|e| {
            SourceError::Configuration(format!("invalid base_url {:?}: {e}", self.base_url))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = PlacesConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, "https://maps.googleapis.com");
        assert_eq!(config.timeout_seconds, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn new_sets_key() {
        let config = PlacesConfig::new("test-key");
        assert_eq!(config.api_key(), Some("test-key"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = PlacesConfig::new("   ");
        assert!(config.api_key().is_none());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = PlacesConfig::new("k").with_timeout_seconds(0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_seconds"));
    }

    #[test]
    fn relative_base_url_rejected() {
        let config = PlacesConfig::new("k").with_base_url("not a url");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn debug_redacts_key() {
        let config = PlacesConfig::new("super-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: PlacesConfig =
            serde_json::from_str(r#"{"timeout_seconds": 3}"#).expect("deserialize");
        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.base_url, DEFAULT_PLACES_BASE_URL);
        assert!(config.api_key.is_none());
    }
}
