//! Error types for the company-scout service.

use scout_sources::SourceError;

/// Top-level error type for starting and running the service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Configuration file or value error.
    #[error("config error: {0}")]
    Config(String),

    /// The HTTP listener could not be bound.
    #[error("bind error: {0}")]
    Bind(String),

    /// Listing source setup error.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ServiceError>;
