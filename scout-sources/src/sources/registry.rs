//! Company registry adapter: funding and firmographic profiles.
//!
//! Intended to enrich places listings with revenue and contact data from a
//! company registry API. No integration exists yet.

use async_trait::async_trait;

use crate::adapter::SourceAdapter;
use crate::error::SourceError;
use crate::types::{CompanyRecord, CompanySearch, SourceKind};

/// Company registry lookup.
///
/// Declared extension point: looks up by `(industry, state)` only and
/// currently returns no records.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistryAdapter;

impl RegistryAdapter {
    /// Look up companies in `industry`, optionally restricted to `state`.
    pub async fn lookup(
        &self,
        industry: &str,
        state: Option<&str>,
    ) -> Result<Vec<CompanyRecord>, SourceError> {
        tracing::trace!(industry, state, "registry lookup");
        Ok(Vec::new())
    }
}

#[async_trait]
impl SourceAdapter for RegistryAdapter {
    async fn search(&self, search: &CompanySearch) -> Result<Vec<CompanyRecord>, SourceError> {
        self.lookup(&search.industry, search.state()).await
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Registry
    }
}
