//! HTTP surface for company aggregation.
//!
//! ## Endpoints
//!
//! - `GET /companies`: aggregated, deduplicated company listings
//! - `GET /healthz`: liveness probe

use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use scout_sources::{Aggregator, ApiKeySource, CompanyRecord, CompanySearch, Revenue};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::{EnvApiKey, ServerConfig, ServiceConfig};
use crate::error::{Result, ServiceError};

/// Default `limit` when the query string omits it.
pub const DEFAULT_LIMIT: usize = 10;

/// Largest accepted `limit`.
pub const MAX_LIMIT: usize = 50;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Raw `GET /companies` query parameters.
///
/// Everything arrives as text and is checked by [`CompaniesParams::validate`]
/// so that every malformed request gets the same 422 shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompaniesParams {
    /// Industry keyword (required).
    pub industry: Option<String>,
    /// City bias.
    pub city: Option<String>,
    /// State bias.
    pub state: Option<String>,
    /// Maximum records, `1..=50`.
    pub limit: Option<String>,
    /// Whether to keep `source_url` on each record.
    pub include_sources: Option<String>,
}

/// A validated `GET /companies` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompaniesRequest {
    /// Criteria handed to the aggregator.
    pub search: CompanySearch,
    /// Whether to keep `source_url` on each record.
    pub include_sources: bool,
}

impl CompaniesParams {
    /// Check and convert the raw parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a missing or blank `industry`,
    /// a `limit` outside `1..=50`, or an unrecognised boolean.
    pub fn validate(self) -> std::result::Result<CompaniesRequest, ApiError> {
        let industry = self
            .industry
            .map(|industry| industry.trim().to_owned())
            .filter(|industry| !industry.is_empty())
            .ok_or_else(|| ApiError::Validation("industry is required".into()))?;

        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_LIMIT,
            Some(raw) => {
                let limit: usize = raw.parse().map_err(|_| {
                    ApiError::Validation(format!("limit must be an integer, got {raw:?}"))
                })?;
                if !(1..=MAX_LIMIT).contains(&limit) {
                    return Err(ApiError::Validation(format!(
                        "limit must be between 1 and {MAX_LIMIT}, got {limit}"
                    )));
                }
                limit
            }
        };

        let include_sources = match self.include_sources.as_deref() {
            None => true,
            Some(raw) => parse_flag(raw).ok_or_else(|| {
                ApiError::Validation(format!("include_sources must be a boolean, got {raw:?}"))
            })?,
        };

        Ok(CompaniesRequest {
            search: CompanySearch {
                industry,
                city: self.city,
                state: self.state,
                limit,
            },
            include_sources,
        })
    }
}

/// Parse the boolean spellings accepted in query strings.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// One company in a `GET /companies` response.
///
/// Absent fields serialize as `null`. `source_url` is omitted entirely when
/// the caller asked for `include_sources=false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyListing {
    /// Business name.
    pub name: String,
    /// Comma-joined category labels.
    pub business_type: Option<String>,
    /// Display location.
    pub location: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Reported revenue.
    pub revenue: Option<Revenue>,
    /// Contact detail.
    pub contact: Option<String>,
    /// Provenance link; the outer `None` drops the key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<Option<String>>,
}

impl CompanyListing {
    /// Shape a record for the response.
    pub fn from_record(record: CompanyRecord, include_sources: bool) -> Self {
        Self {
            name: record.name,
            business_type: record.business_type,
            location: record.location,
            address: record.address,
            revenue: record.revenue,
            contact: record.contact,
            source_url: include_sources.then_some(record.source_url),
        }
    }
}

/// Liveness probe payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: String,
}

/// Error body for rejected requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable reason.
    pub detail: String,
}

/// Errors returned from route handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request parameters are invalid (422).
    #[error("{0}")]
    Validation(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = ErrorDetail {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    aggregator: Arc<Aggregator>,
}

/// Build the service router around `aggregator`.
pub fn router(aggregator: Aggregator) -> Router {
    let state = AppState {
        aggregator: Arc::new(aggregator),
    };
    Router::new()
        .route("/companies", get(handle_companies))
        .route("/healthz", get(handle_healthz))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// CompanyServer
// ---------------------------------------------------------------------------

/// Company aggregation HTTP server running in a background task.
pub struct CompanyServer {
    /// The address the server is listening on.
    addr: SocketAddr,
    /// Handle to the background server task.
    handle: JoinHandle<()>,
}

impl CompanyServer {
    /// Start the server with the standard source list.
    ///
    /// The places API key is read from the environment on every request
    /// (see [`EnvApiKey`]), falling back to the config file key.
    ///
    /// # Errors
    ///
    /// Returns an error if the places config is invalid or the listener
    /// cannot bind.
    pub async fn start(config: &ServiceConfig) -> Result<Self> {
        let credentials = EnvApiKey::new(&config.places);
        Self::start_with_key_source(config, Arc::new(credentials)).await
    }

    /// Start the server with the standard source list, reading the places
    /// API key from `credentials` on every request.
    ///
    /// A missing key is logged and tolerated: the places source then
    /// contributes nothing until a key becomes available.
    ///
    /// # Errors
    ///
    /// Returns an error if the places config is invalid or the listener
    /// cannot bind.
    pub async fn start_with_key_source(
        config: &ServiceConfig,
        credentials: Arc<dyn ApiKeySource>,
    ) -> Result<Self> {
        if credentials.current_key().is_none() {
            tracing::warn!(
                "no places API key available yet; places results stay empty until one is set"
            );
        }
        let aggregator = Aggregator::standard_with_key_source(config.places.clone(), credentials)?;
        Self::start_with(aggregator, &config.server).await
    }

    /// Start the server around a caller-supplied aggregator.
    ///
    /// Binds to `{config.host}:{config.port}` (use port `0` for auto-assign)
    /// and begins serving in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start_with(aggregator: Aggregator, config: &ServerConfig) -> Result<Self> {
        let app = router(aggregator);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ServiceError::Bind(format!("{bind_addr}: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| ServiceError::Bind(format!("failed to get local addr: {e}")))?;

        info!("company-scout listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("company-scout server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    /// Returns the address the server is listening on.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for CompanyServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// `GET /companies`: aggregate listings across all sources.
async fn handle_companies(
    State(state): State<AppState>,
    params: std::result::Result<Query<CompaniesParams>, QueryRejection>,
) -> std::result::Result<Json<Vec<CompanyListing>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::Validation(e.body_text()))?;
    let request = params.validate()?;

    let records = state
        .aggregator
        .aggregate_search(&request.search, request.include_sources)
        .await
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    info!(
        industry = %request.search.industry,
        limit = request.search.limit,
        count = records.len(),
        "companies request served"
    );

    let listings = records
        .into_iter()
        .map(|record| CompanyListing::from_record(record, request.include_sources))
        .collect();
    Ok(Json(listings))
}

/// `GET /healthz`: liveness probe.
async fn handle_healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_owned(),
    })
}
