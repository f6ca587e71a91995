//! Error types for the scout-sources crate.
//!
//! All errors use stable string messages suitable for logs and programmatic
//! handling. Provider credentials never appear in error messages.

/// Errors that can occur while querying a business listing source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The adapter is missing configuration it needs (usually the credential).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The provider could not be reached: timeout, refused connection, DNS.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The provider answered with a non-success status.
    #[error("upstream error (status {status}): {body}")]
    Upstream {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Response body, or the provider's own error message.
        body: String,
    },

    /// The provider's response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// The aggregate criteria are invalid (blank industry, zero limit).
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

impl SourceError {
    /// Classify a transport-level [`reqwest::Error`].
    ///
    /// Status errors become [`SourceError::Upstream`]; everything else
    /// (timeouts, connect and DNS failures, aborted bodies) is
    /// [`SourceError::UpstreamUnavailable`]. The URL is stripped from the
    /// message because it carries the credential as a query parameter.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Upstream {
                status: status.as_u16(),
                body: String::new(),
            };
        }
        let kind = if err.is_timeout() {
            "request timed out"
        } else if err.is_connect() {
            "connection failed"
        } else {
            "request failed"
        };
        Self::UpstreamUnavailable(format!("{kind}: {}", err.without_url()))
    }
}

/// Convenience type alias for scout-sources results.
pub type Result<T> = std::result::Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_configuration() {
        let err = SourceError::Configuration("GOOGLE_MAPS_API_KEY is not set".into());
        assert_eq!(
            err.to_string(),
            "configuration error: GOOGLE_MAPS_API_KEY is not set"
        );
    }

    #[test]
    fn display_upstream_unavailable() {
        let err = SourceError::UpstreamUnavailable("request timed out".into());
        assert_eq!(err.to_string(), "upstream unavailable: request timed out");
    }

    #[test]
    fn display_upstream() {
        let err = SourceError::Upstream {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(err.to_string(), "upstream error (status 403): forbidden");
    }

    #[test]
    fn display_parse() {
        let err = SourceError::Parse("missing field `results`".into());
        assert_eq!(err.to_string(), "parse error: missing field `results`");
    }

    #[test]
    fn display_invalid_query() {
        let err = SourceError::InvalidQuery("limit must be at least 1".into());
        assert_eq!(err.to_string(), "invalid query: limit must be at least 1");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SourceError>();
    }
}
