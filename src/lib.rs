//! company-scout: aggregated business listings over HTTP.
//!
//! Serves `GET /companies`, which fans out to every listing source in
//! [`scout_sources`], merges results by business name, and returns at most
//! `limit` deduplicated records. `GET /healthz` is a liveness probe.
//!
//! # Architecture
//!
//! - **config**: TOML file loaded at startup; the places API key is read
//!   from the environment on every request
//! - **server**: axum router, query validation, response shaping
//! - **scout_sources**: source adapters and the aggregator (separate crate)

pub mod config;
pub mod error;
pub mod server;

pub use config::{EnvApiKey, ServerConfig, ServiceConfig};
pub use error::{Result, ServiceError};
pub use server::{CompanyServer, router};
