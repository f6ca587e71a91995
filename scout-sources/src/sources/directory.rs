//! Small-business investment directory adapter.
//!
//! Intended to read the published directory of licensed small-business
//! investment companies. No integration exists yet.

use async_trait::async_trait;

use crate::adapter::SourceAdapter;
use crate::error::SourceError;
use crate::types::{CompanyRecord, CompanySearch, SourceKind};

/// Investment directory lookup.
///
/// Declared extension point: looks up by `(industry, state)` only and
/// currently returns no records.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryAdapter;

impl DirectoryAdapter {
    /// Look up companies in `industry`, optionally restricted to `state`.
    pub async fn lookup(
        &self,
        industry: &str,
        state: Option<&str>,
    ) -> Result<Vec<CompanyRecord>, SourceError> {
        tracing::trace!(industry, state, "directory lookup");
        Ok(Vec::new())
    }
}

#[async_trait]
impl SourceAdapter for DirectoryAdapter {
    async fn search(&self, search: &CompanySearch) -> Result<Vec<CompanyRecord>, SourceError> {
        self.lookup(&search.industry, search.state()).await
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Directory
    }
}
