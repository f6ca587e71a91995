//! Regulatory filings adapter: adviser registration records.
//!
//! Intended to extract firm details from adviser registration filings.
//! No integration exists yet.

use async_trait::async_trait;

use crate::adapter::SourceAdapter;
use crate::error::SourceError;
use crate::types::{CompanyRecord, CompanySearch, SourceKind};

/// Regulatory filings lookup.
///
/// Declared extension point: looks up by `(industry, state)` only and
/// currently returns no records.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilingsAdapter;

impl FilingsAdapter {
    /// Look up companies in `industry`, optionally restricted to `state`.
    pub async fn lookup(
        &self,
        industry: &str,
        state: Option<&str>,
    ) -> Result<Vec<CompanyRecord>, SourceError> {
        tracing::trace!(industry, state, "filings lookup");
        Ok(Vec::new())
    }
}

#[async_trait]
impl SourceAdapter for FilingsAdapter {
    async fn search(&self, search: &CompanySearch) -> Result<Vec<CompanyRecord>, SourceError> {
        self.lookup(&search.industry, search.state()).await
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Filings
    }
}
