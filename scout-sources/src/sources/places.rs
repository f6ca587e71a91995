//! Places text-search adapter: the one live listing source.
//!
//! Calls the mapping provider's text-search endpoint with a free-text query
//! such as `"plumbing companies in Chicago, IL"` and normalises each place
//! into a [`CompanyRecord`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::adapter::SourceAdapter;
use crate::config::PlacesConfig;
use crate::credentials::{self, ApiKeySource, FixedKey};
use crate::error::SourceError;
use crate::http;
use crate::types::{CompanyRecord, CompanySearch, SourceKind};

/// Path of the text-search operation, relative to the configured base URL.
const TEXT_SEARCH_PATH: &str = "maps/api/place/textsearch/json";

/// Origin used for per-place deep links.
const DEEP_LINK_BASE: &str = "https://maps.google.com/";

/// Places provider text-search adapter.
///
/// Holds its own [`PlacesConfig`], a reusable HTTP client and the
/// [`ApiKeySource`] consulted on every search. One outbound request per
/// search; no retries.
pub struct PlacesAdapter {
    config: PlacesConfig,
    credentials: Arc<dyn ApiKeySource>,
    client: reqwest::Client,
}

impl PlacesAdapter {
    /// Create an adapter from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Configuration`] if the config is invalid or
    /// the HTTP client cannot be built. A missing API key is accepted here
    /// and reported by each search instead.
    pub fn new(config: PlacesConfig) -> Result<Self, SourceError> {
        let credentials = Arc::new(FixedKey::new(config.api_key().map(str::to_owned)));
        Self::with_key_source(config, credentials)
    }

    /// Create an adapter that asks `credentials` for the API key on each
    /// search instead of using `config.api_key`.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesAdapter::new`].
    pub fn with_key_source(
        config: PlacesConfig,
        credentials: Arc<dyn ApiKeySource>,
    ) -> Result<Self, SourceError> {
        config.validate()?;
        let client = http::build_client(&config)?;
        Ok(Self {
            config,
            credentials,
            client,
        })
    }

    /// Search the provider for `query`, optionally biased to `location`,
    /// returning at most `max_results` records.
    ///
    /// # Errors
    ///
    /// - [`SourceError::Configuration`] when no API key is configured
    /// - [`SourceError::UpstreamUnavailable`] on timeout or network failure
    /// - [`SourceError::Upstream`] on a non-success status or a provider-level
    ///   rejection such as `REQUEST_DENIED`
    /// - [`SourceError::Parse`] when the body is not the expected JSON
    pub async fn search_places(
        &self,
        query: &str,
        location: Option<&str>,
        max_results: usize,
    ) -> Result<Vec<CompanyRecord>, SourceError> {
        let api_key = credentials::usable_key(self.credentials.current_key()).ok_or_else(|| {
            SourceError::Configuration("places API key is not configured".into())
        })?;

        let text = search_text(query, location);
        tracing::trace!(query = %text, "places text search");

        let endpoint = self.endpoint()?;
        let response = self
            .client
            .get(endpoint)
            .query(&[("query", text.as_str()), ("key", api_key.as_str())])
            .send()
            .await
            .map_err(SourceError::from_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(SourceError::from_transport)?;

        if !status.is_success() {
            return Err(SourceError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        tracing::trace!(bytes = body.len(), "places response received");
        parse_places_response(&body, max_results)
    }

    /// Text-search URL under `base_url`, keeping any path prefix it carries.
    fn endpoint(&self) -> Result<Url, SourceError> {
        let mut base = Url::parse(&self.config.base_url).map_err(|e| {
            SourceError::Configuration(format!("invalid places endpoint: {e}"))
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(TEXT_SEARCH_PATH)
            .map_err(|e| SourceError::Configuration(format!("invalid places endpoint: {e}")))
    }
}

#[async_trait]
impl SourceAdapter for PlacesAdapter {
    async fn search(&self, search: &CompanySearch) -> Result<Vec<CompanyRecord>, SourceError> {
        let location = search.location();
        self.search_places(&search.places_query(), location.as_deref(), search.limit)
            .await
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Places
    }
}

/// Build the provider search string: `query`, plus `" in <location>"`.
fn search_text(query: &str, location: Option<&str>) -> String {
    match location {
        Some(location) if !location.trim().is_empty() => format!("{query} in {location}"),
        _ => query.to_owned(),
    }
}

/// Deep link to a place listing, built from the provider's place identifier.
fn deep_link(place_id: &str) -> Option<String> {
    Url::parse_with_params(DEEP_LINK_BASE, &[("cid", place_id)])
        .ok()
        .map(String::from)
}

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<Place>,
}

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    place_id: Option<String>,
}

impl From<Place> for CompanyRecord {
    fn from(place: Place) -> Self {
        let business_type = if place.types.is_empty() {
            None
        } else {
            Some(place.types.join(", "))
        };
        let source_url = place
            .place_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .and_then(deep_link);

        CompanyRecord {
            name: place.name.unwrap_or_default(),
            business_type,
            location: place.formatted_address.clone(),
            address: place.formatted_address,
            revenue: None,
            contact: None,
            source_url,
        }
    }
}

/// Parse a text-search response body into records.
///
/// Extracted as a separate function for testability with canned JSON.
pub(crate) fn parse_places_response(
    body: &str,
    max_results: usize,
) -> Result<Vec<CompanyRecord>, SourceError> {
    let response: TextSearchResponse = serde_json::from_str(body)
        .map_err(|e| SourceError::Parse(format!("places response: {e}")))?;

    if let Some(status) = response.status.as_deref() {
        if status != "OK" && status != "ZERO_RESULTS" {
            let detail = response.error_message.unwrap_or_default();
            return Err(SourceError::Upstream {
                status: 200,
                body: format!("{status}: {detail}"),
            });
        }
    }

    let records: Vec<CompanyRecord> = response
        .results
        .into_iter()
        .take(max_results)
        .map(CompanyRecord::from)
        .collect();

    tracing::debug!(count = records.len(), "places results parsed");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const REQUEST_PATH: &str = "/maps/api/place/textsearch/json";

    /// A key that can be swapped after the adapter is built.
    #[derive(Default)]
    struct RotatingKey(Mutex<Option<String>>);

    impl RotatingKey {
        fn set(&self, key: &str) {
            *self.0.lock().unwrap() = Some(key.to_owned());
        }
    }

    impl ApiKeySource for RotatingKey {
        fn current_key(&self) -> Option<String> {
            self.0.lock().unwrap().clone()
        }
    }

    const MOCK_RESPONSE: &str = r#"{
        "status": "OK",
        "results": [
            {
                "name": "Acme Plumbing",
                "types": ["plumber", "point_of_interest", "establishment"],
                "formatted_address": "123 Main St, Chicago, IL 60601, USA",
                "place_id": "ChIJacme"
            },
            {
                "name": "Blue Pipe Co",
                "types": [],
                "formatted_address": "456 Oak Ave, Chicago, IL 60602, USA"
            },
            {
                "name": "Drain Kings",
                "types": ["plumber"],
                "place_id": "ChIJdrain"
            }
        ]
    }"#;

    fn adapter_for(server: &MockServer) -> PlacesAdapter {
        PlacesAdapter::new(PlacesConfig::new("test-key").with_base_url(server.uri()))
            .expect("valid config")
    }

    #[test]
    fn search_text_appends_location() {
        assert_eq!(
            search_text("plumbing companies", Some("Chicago, IL")),
            "plumbing companies in Chicago, IL"
        );
        assert_eq!(search_text("plumbing companies", None), "plumbing companies");
        assert_eq!(search_text("plumbing companies", Some(" ")), "plumbing companies");
    }

    #[test]
    fn deep_link_uses_place_id() {
        assert_eq!(
            deep_link("ChIJacme").as_deref(),
            Some("https://maps.google.com/?cid=ChIJacme")
        );
    }

    #[test]
    fn parse_maps_all_fields() {
        let records = parse_places_response(MOCK_RESPONSE, 10).expect("should parse");
        assert_eq!(records.len(), 3);

        let acme = &records[0];
        assert_eq!(acme.name, "Acme Plumbing");
        assert_eq!(
            acme.business_type.as_deref(),
            Some("plumber, point_of_interest, establishment")
        );
        assert_eq!(
            acme.location.as_deref(),
            Some("123 Main St, Chicago, IL 60601, USA")
        );
        assert_eq!(acme.address, acme.location);
        assert!(acme.revenue.is_none());
        assert!(acme.contact.is_none());
        assert_eq!(
            acme.source_url.as_deref(),
            Some("https://maps.google.com/?cid=ChIJacme")
        );
    }

    #[test]
    fn parse_empty_types_gives_no_business_type() {
        let records = parse_places_response(MOCK_RESPONSE, 10).expect("should parse");
        assert!(records[1].business_type.is_none());
    }

    #[test]
    fn parse_missing_place_id_gives_no_source_url() {
        let records = parse_places_response(MOCK_RESPONSE, 10).expect("should parse");
        assert!(records[1].source_url.is_none());
        assert!(records[2].address.is_none());
    }

    #[test]
    fn parse_respects_max_results() {
        let records = parse_places_response(MOCK_RESPONSE, 2).expect("should parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "Blue Pipe Co");
    }

    #[test]
    fn parse_zero_results() {
        let records =
            parse_places_response(r#"{"status": "ZERO_RESULTS", "results": []}"#, 5)
                .expect("should parse");
        assert!(records.is_empty());
    }

    #[test]
    fn parse_provider_rejection_is_upstream_error() {
        let body = r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid.", "results": []}"#;
        let err = parse_places_response(body, 5).unwrap_err();
        match err {
            SourceError::Upstream { status, body } => {
                assert_eq!(status, 200);
                assert!(body.starts_with("REQUEST_DENIED"));
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[test]
    fn parse_garbage_is_parse_error() {
        let err = parse_places_response("<html>nope</html>", 5).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn kind_is_places() {
        let adapter = PlacesAdapter::new(PlacesConfig::default()).expect("valid config");
        assert_eq!(adapter.kind(), SourceKind::Places);
    }

    #[tokio::test]
    async fn missing_key_fails_fast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_RESPONSE))
            .expect(0)
            .mount(&server)
            .await;

        let adapter = PlacesAdapter::new(PlacesConfig::default().with_base_url(server.uri()))
            .expect("valid config");
        let err = adapter
            .search_places("plumbing companies", None, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Configuration(_)));
    }

    #[tokio::test]
    async fn sends_query_with_location_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(REQUEST_PATH))
            .and(query_param("query", "plumbing companies in Chicago, IL"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_RESPONSE))
            .expect(1)
            .mount(&server)
            .await;

        let adapter = adapter_for(&server);
        let search = CompanySearch::new("plumbing", 2)
            .with_city("Chicago")
            .with_state("IL");
        let records = adapter.search(&search).await.expect("should succeed");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Acme Plumbing");
    }

    #[tokio::test]
    async fn non_success_status_is_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(REQUEST_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = adapter_for(&server)
            .search_places("plumbing companies", None, 5)
            .await
            .unwrap_err();
        match err {
            SourceError::Upstream { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn timeout_is_upstream_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(REQUEST_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(MOCK_RESPONSE)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = PlacesConfig::new("test-key")
            .with_base_url(server.uri())
            .with_timeout_seconds(1);
        let adapter = PlacesAdapter::new(config).expect("valid config");
        let err = adapter
            .search_places("plumbing companies", None, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::UpstreamUnavailable(_)));
        assert!(!err.to_string().contains("test-key"));
    }

    #[tokio::test]
    async fn refused_connection_is_upstream_unavailable() {
        // Port 1 on loopback is never listening.
        let config = PlacesConfig::new("test-key").with_base_url("http://127.0.0.1:1");
        let adapter = PlacesAdapter::new(config).expect("valid config");
        let err = adapter
            .search_places("plumbing companies", None, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::UpstreamUnavailable(_)));
    }

    #[test]
    fn endpoint_keeps_base_url_path_prefix() {
        for base in ["https://proxy.example/google", "https://proxy.example/google/"] {
            let adapter = PlacesAdapter::new(PlacesConfig::new("k").with_base_url(base))
                .expect("valid config");
            assert_eq!(
                adapter.endpoint().expect("endpoint").as_str(),
                "https://proxy.example/google/maps/api/place/textsearch/json"
            );
        }
        let adapter = PlacesAdapter::new(PlacesConfig::default()).expect("valid config");
        assert_eq!(
            adapter.endpoint().expect("endpoint").as_str(),
            "https://maps.googleapis.com/maps/api/place/textsearch/json"
        );
    }

    #[tokio::test]
    async fn prefixed_base_url_reaches_provider() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/proxy{REQUEST_PATH}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_RESPONSE))
            .expect(1)
            .mount(&server)
            .await;

        let config =
            PlacesConfig::new("test-key").with_base_url(format!("{}/proxy", server.uri()));
        let records = PlacesAdapter::new(config)
            .expect("valid config")
            .search_places("plumbing companies", None, 5)
            .await
            .expect("should succeed");
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn key_source_consulted_on_every_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(REQUEST_PATH))
            .and(query_param("key", "late-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(MOCK_RESPONSE))
            .expect(1)
            .mount(&server)
            .await;

        let key = Arc::new(RotatingKey::default());
        let adapter = PlacesAdapter::with_key_source(
            PlacesConfig::default().with_base_url(server.uri()),
            key.clone(),
        )
        .expect("valid config");

        let err = adapter
            .search_places("plumbing companies", None, 5)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Configuration(_)));

        key.set("late-key");
        let records = adapter
            .search_places("plumbing companies", None, 5)
            .await
            .expect("key is now available");
        assert_eq!(records.len(), 3);
    }
}
