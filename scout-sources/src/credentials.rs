//! Provider credential lookup.
//!
//! The places adapter asks its [`ApiKeySource`] for a key on every search,
//! so a key that changes while the process runs is picked up by the next
//! request. This crate never reads the environment itself; callers that
//! want environment lookup supply their own source.

/// Supplies the places provider API key at search time.
pub trait ApiKeySource: Send + Sync {
    /// The key to use for the next request, if any.
    fn current_key(&self) -> Option<String>;
}

/// A key fixed at construction, typically taken from a config file.
#[derive(Clone, Default)]
pub struct FixedKey(Option<String>);

impl FixedKey {
    /// Wrap `key`. `None` makes every search fail with a configuration error.
    pub fn new(key: Option<String>) -> Self {
        Self(key)
    }
}

impl ApiKeySource for FixedKey {
    fn current_key(&self) -> Option<String> {
        self.0.clone()
    }
}

impl std::fmt::Debug for FixedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FixedKey")
            .field(&self.0.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Trim `key` and discard it when blank.
pub(crate) fn usable_key(key: Option<String>) -> Option<String> {
    key.map(|key| key.trim().to_owned())
        .filter(|key| !key.is_empty())
}
