//! Core aggregator: concurrent fan-out to sources, ordered merge, truncate.
//!
//! Queries every configured source concurrently, downgrades failed sources
//! to empty contributions, merges by business name in source priority order,
//! and truncates to the requested limit.

use std::sync::Arc;

use crate::adapter::SourceAdapter;
use crate::config::PlacesConfig;
use crate::credentials::ApiKeySource;
use crate::error::SourceError;
use crate::sources::{DirectoryAdapter, FilingsAdapter, PlacesAdapter, RegistryAdapter};
use crate::types::{CompanyRecord, CompanySearch, SourceKind};

use super::merge::merge_records;

/// Fans a company search out to an ordered list of sources.
///
/// The list order is the merge priority: when two sources populate the
/// same field of the same company, the earlier source wins.
#[derive(Clone)]
pub struct Aggregator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
}

impl Aggregator {
    /// Create an aggregator over `adapters`, in priority order.
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Self { adapters }
    }

    /// The standard source list: places, registry, directory, filings.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Configuration`] if `places` is invalid.
    pub fn standard(places: PlacesConfig) -> Result<Self, SourceError> {
        Ok(Self::with_places(PlacesAdapter::new(places)?))
    }

    /// The standard source list, with the places key read from
    /// `credentials` on every search.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Configuration`] if `places` is invalid.
    pub fn standard_with_key_source(
        places: PlacesConfig,
        credentials: Arc<dyn ApiKeySource>,
    ) -> Result<Self, SourceError> {
        Ok(Self::with_places(PlacesAdapter::with_key_source(
            places,
            credentials,
        )?))
    }

    fn with_places(places: PlacesAdapter) -> Self {
        Self::new(vec![
            Arc::new(places),
            Arc::new(RegistryAdapter),
            Arc::new(DirectoryAdapter),
            Arc::new(FilingsAdapter),
        ])
    }

    /// Sources in priority order.
    pub fn sources(&self) -> Vec<SourceKind> {
        self.adapters.iter().map(|adapter| adapter.kind()).collect()
    }

    /// Aggregate companies in `industry`, biased to `city` and `state`.
    ///
    /// Convenience wrapper around [`Aggregator::aggregate_search`].
    ///
    /// # Errors
    ///
    /// Same as [`Aggregator::aggregate_search`].
    pub async fn aggregate(
        &self,
        industry: &str,
        city: Option<&str>,
        state: Option<&str>,
        limit: usize,
        include_sources: bool,
    ) -> Result<Vec<CompanyRecord>, SourceError> {
        let search = CompanySearch {
            industry: industry.to_owned(),
            city: city.map(str::to_owned),
            state: state.map(str::to_owned),
            limit,
        };
        self.aggregate_search(&search, include_sources).await
    }

    /// Run `search` against every source and merge the results.
    ///
    /// # Pipeline
    ///
    /// 1. Fan out to all sources concurrently with [`futures::future::join_all`]
    /// 2. Log per-source failures at warn level; a failed source contributes nothing
    /// 3. Merge by name in source priority order (not completion order)
    /// 4. Truncate to `search.limit`, keeping first-seen order
    /// 5. Clear `source_url` when `include_sources` is false
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidQuery`] for a blank industry or a zero
    /// limit. Source failures never fail the aggregate.
    pub async fn aggregate_search(
        &self,
        search: &CompanySearch,
        include_sources: bool,
    ) -> Result<Vec<CompanyRecord>, SourceError> {
        if search.industry.trim().is_empty() {
            return Err(SourceError::InvalidQuery("industry must not be empty".into()));
        }
        if search.limit == 0 {
            return Err(SourceError::InvalidQuery("limit must be at least 1".into()));
        }

        // 1. Fan out. join_all yields outcomes in input order.
        let futures = self.adapters.iter().map(|adapter| async move {
            let outcome = adapter.search(search).await;
            (adapter.kind(), outcome)
        });
        let outcomes = futures::future::join_all(futures).await;

        // 2. Downgrade failures to empty contributions.
        let batches = outcomes.into_iter().map(|(source, outcome)| match outcome {
            Ok(records) => {
                tracing::debug!(%source, count = records.len(), "source returned records");
                (source, records)
            }
            Err(err) => {
                tracing::warn!(%source, error = %err, "source query failed");
                (source, Vec::new())
            }
        });

        // 3. Merge in priority order.
        let merged = merge_records(batches);
        let enriched = merged.iter().filter(|m| m.sources.len() > 1).count();
        tracing::debug!(distinct = merged.len(), enriched, "records merged");

        // 4. Truncate, 5. strip provenance.
        let records = merged
            .into_iter()
            .take(search.limit)
            .map(|m| {
                let mut record = m.record;
                if !include_sources {
                    record.source_url = None;
                }
                record
            })
            .collect();

        Ok(records)
    }
}

impl std::fmt::Debug for Aggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("sources", &self.sources())
            .finish()
    }
}
