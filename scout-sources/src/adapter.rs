//! Trait definition for pluggable business listing sources.
//!
//! Each source (places provider, registry, directory, filings) implements
//! [`SourceAdapter`] so the aggregator can hold them as one ordered list of
//! trait objects and gain new sources without code changes.

use async_trait::async_trait;

use crate::error::SourceError;
use crate::types::{CompanyRecord, CompanySearch, SourceKind};

/// A pluggable business listing source.
///
/// Implementors translate the shared [`CompanySearch`] criteria into their
/// own provider request and normalise the answer into [`CompanyRecord`]s.
/// Each adapter decides which criteria it uses; the places adapter builds a
/// free-text query with a location bias, the placeholder sources take only
/// industry and state.
///
/// All implementations must be `Send + Sync` for concurrent fan-out.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Look up companies matching `search`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the source is misconfigured, unreachable,
    /// or answers with an error. Implementations never invent records.
    async fn search(&self, search: &CompanySearch) -> Result<Vec<CompanyRecord>, SourceError>;

    /// Returns which [`SourceKind`] this adapter represents.
    fn kind(&self) -> SourceKind;
}
