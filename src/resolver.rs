//! The HTML resolution seam.
//!
//! Item records may carry a reference key instead of an inline HTML body.
//! Resolution of that key is a capability injected at indexer construction:
//! a single-method contract mapping the key to HTML text, which may fail.
//! The indexer awaits the resolver during a re-index run and aborts the
//! whole run on the first failure.

use async_trait::async_trait;
use miette::Diagnostic;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Failure raised by an [`HtmlResolver`] for a given reference key.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(contentsmith::resolver::failed))]
pub struct ResolverError {
    message: String,
}

impl ResolverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Standard failure for a key the resolver has no mapping for.
    pub fn unknown_key(key: &str) -> Self {
        Self::new(format!("no HTML registered for reference key '{key}'"))
    }
}

/// Capability mapping an opaque reference key to resolved HTML text.
///
/// Implementations should be side-effect free from the indexer's point of
/// view. The resolver is only consulted for items whose inline `html` field
/// is absent or blank.
#[async_trait]
pub trait HtmlResolver: Send + Sync {
    async fn resolve(&self, key: &str) -> Result<String, ResolverError>;
}

/// Plain functions and closures act as resolvers directly.
///
/// ```rust
/// use contentsmith::resolver::{HtmlResolver, ResolverError};
///
/// fn lookup(key: &str) -> Result<String, ResolverError> {
///     Ok(format!("<p>{key}</p>"))
/// }
///
/// let _resolver: &dyn HtmlResolver = &lookup;
/// ```
#[async_trait]
impl<F> HtmlResolver for F
where
    F: Fn(&str) -> Result<String, ResolverError> + Send + Sync,
{
    async fn resolve(&self, key: &str) -> Result<String, ResolverError> {
        self(key)
    }
}

/// In-memory resolver over a fixed key-to-HTML table.
///
/// Useful for tests, demos, and callers whose reference keys are known up
/// front. Unknown keys fail with [`ResolverError::unknown_key`].
#[derive(Clone, Debug, Default)]
pub struct MapResolver {
    entries: FxHashMap<String, String>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a key-to-HTML mapping, replacing any previous entry.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, html: impl Into<String>) -> Self {
        self.entries.insert(key.into(), html.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl HtmlResolver for MapResolver {
    async fn resolve(&self, key: &str) -> Result<String, ResolverError> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| ResolverError::unknown_key(key))
    }
}
