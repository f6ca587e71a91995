//! # scout-sources
//!
//! Business listing sources and the aggregator that merges them.
//!
//! ## Design
//!
//! - Every source implements [`SourceAdapter`]; the aggregator holds an
//!   ordered list of trait objects
//! - The places adapter calls a mapping provider's text-search API; the
//!   registry, directory and filings adapters are extension points that
//!   return nothing yet
//! - Sources are queried concurrently and merged by business name in fixed
//!   priority order: the first source to populate a field wins, later
//!   sources only fill gaps
//! - Graceful degradation: a failed source contributes nothing and never
//!   fails the aggregate
//!
//! ## Security
//!
//! - The provider credential is passed in explicitly, either fixed in
//!   [`PlacesConfig`] or through an [`ApiKeySource`] consulted per search;
//!   this crate never reads the environment
//! - Credentials are redacted from `Debug` output and stripped from errors
//! - Query text is logged only at trace level

pub mod adapter;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod sources;
pub mod types;

pub use adapter::SourceAdapter;
pub use config::PlacesConfig;
pub use credentials::{ApiKeySource, FixedKey};
pub use error::{Result, SourceError};
pub use orchestrator::aggregate::Aggregator;
pub use orchestrator::merge::{merge_records, MergedRecord};
pub use types::{CompanyRecord, CompanySearch, Revenue, SourceKind};

/// Aggregate companies from the standard source list.
///
/// Builds an [`Aggregator::standard`] from `places` and runs one search.
/// Long-running callers should build the [`Aggregator`] once and reuse it.
///
/// # Errors
///
/// Returns [`SourceError::Configuration`] if `places` is invalid, or
/// [`SourceError::InvalidQuery`] for a blank industry or zero limit.
/// Individual source failures are logged and do not cause an error.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> scout_sources::Result<()> {
/// let places = scout_sources::PlacesConfig::new("my-api-key");
/// let companies =
///     scout_sources::aggregate(&places, "plumbing", Some("Chicago"), Some("IL"), 5, true)
///         .await?;
/// for company in &companies {
///     println!("{}: {:?}", company.name, company.address);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn aggregate(
    places: &PlacesConfig,
    industry: &str,
    city: Option<&str>,
    state: Option<&str>,
    limit: usize,
    include_sources: bool,
) -> Result<Vec<CompanyRecord>> {
    Aggregator::standard(places.clone())?
        .aggregate(industry, city, state, limit, include_sources)
        .await
}
