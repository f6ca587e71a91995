//! Configuration types for the company-scout service.

use scout_sources::{ApiKeySource, PlacesConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_ENV: &str = "COMPANY_SCOUT_CONFIG";

/// Environment variable holding the places provider API key.
pub const PLACES_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Places provider settings.
    pub places: PlacesConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host/IP to bind.
    pub host: String,
    /// TCP port to bind. `0` picks an ephemeral port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8000,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::ServiceError::Config(e.to_string()))
    }

    /// Load configuration the way the server binary does.
    ///
    /// Reads the file named by [`CONFIG_PATH_ENV`] when set, otherwise starts
    /// from defaults, then validates. The places API key is not taken from
    /// the environment here; [`EnvApiKey`] reads it on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the named file is unreadable or the result is invalid.
    pub fn load() -> crate::error::Result<Self> {
        let config = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_file(&PathBuf::from(path))?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ServiceError::Config`] for a blank host or an
    /// invalid places section.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(crate::error::ServiceError::Config(
                "server.host must not be empty".into(),
            ));
        }
        self.places
            .validate()
            .map_err(|e| crate::error::ServiceError::Config(format!("places: {e}")))
    }

    /// `host:port` string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Places API key read from [`PLACES_API_KEY_ENV`] each time it is needed.
///
/// A non-blank environment value wins; otherwise the key from the config
/// file, if any, is used.
pub struct EnvApiKey {
    fallback: Option<String>,
    lookup: Box<dyn Fn(&str) -> Option<String> + Send + Sync>,
}

impl EnvApiKey {
    /// Read the process environment, falling back to `places.api_key`.
    pub fn new(places: &PlacesConfig) -> Self {
        Self::with_lookup(places, |name| std::env::var(name).ok())
    }

    /// Like [`EnvApiKey::new`], but reading variables through `lookup`.
    pub fn with_lookup<F>(places: &PlacesConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            fallback: places.api_key().map(str::to_owned),
            lookup: Box::new(lookup),
        }
    }
}

impl ApiKeySource for EnvApiKey {
    fn current_key(&self) -> Option<String> {
        (self.lookup)(PLACES_API_KEY_ENV)
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.fallback.clone())
    }
}

impl std::fmt::Debug for EnvApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvApiKey")
            .field("variable", &PLACES_API_KEY_ENV)
            .field("fallback", &self.fallback.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
