//! The content indexer: triggered re-reads of the source document and
//! atomic publication of the resulting content set.
//!
//! [`ContentIndexer`] owns the published set. Readers call
//! [`ContentIndexer::content`] at any time, from any thread; an in-flight
//! [`ContentIndexer::reindex`] is invisible to them until it commits. The
//! new set is built on a private working vector and swapped in behind a
//! single pointer store, so a reader observes either the fully-old or the
//! fully-new collection, never a mix.
//!
//! # Examples
//!
//! ```rust
//! use contentsmith::indexer::ContentIndexer;
//! use contentsmith::resolver::MapResolver;
//! use contentsmith::source::StaticSource;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let source = StaticSource::new(r#"[{"title": "Intro", "html": "<p>hi</p>"}]"#);
//! let resolver = MapResolver::new().with_entry("episode-1", "<p>resolved</p>");
//! let indexer = ContentIndexer::new(source, resolver);
//!
//! // Nothing is visible before the first successful run.
//! assert!(indexer.content().is_empty());
//!
//! let summary = indexer.reindex().await.expect("valid document");
//! assert_eq!(summary.entries, 1);
//! assert_eq!(indexer.content()[0].title.as_deref(), Some("Intro"));
//! # }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use url::Url;

use crate::content::{Content, ItemRecord};
use crate::errors::IndexError;
use crate::resolver::{HtmlResolver, ResolverError};
use crate::source::DocumentSource;

/// Statistics for one successful re-index run.
#[derive(Clone, Debug)]
pub struct IndexSummary {
    /// Entries published by this run.
    pub entries: usize,
    /// Entries whose body came from the HTML resolver rather than inline text.
    pub resolved: usize,
    /// Size of the set this run replaced.
    pub replaced: usize,
    /// When the run committed.
    pub when: DateTime<Utc>,
}

/// Owns the current published content set.
///
/// The indexer holds its two collaborators — a [`DocumentSource`] for the
/// raw JSON bytes and an [`HtmlResolver`] for reference keys — from
/// construction on, immutable thereafter. Its published state is a shared
/// slice behind a pointer swap plus a readiness flag that flips exactly once,
/// on the first successful run.
///
/// # Concurrency
///
/// Any number of threads may call [`content`](Self::content) concurrently
/// with each other and with an in-flight [`reindex`](Self::reindex).
/// Overlapping re-index invocations are serialized internally; each run
/// still observes a consistent before/after state.
pub struct ContentIndexer {
    source: Arc<dyn DocumentSource>,
    resolver: Arc<dyn HtmlResolver>,
    published: RwLock<Arc<[Content]>>,
    indexed: AtomicBool,
    // Serializes writers only; readers never touch this.
    reindex_gate: tokio::sync::Mutex<()>,
}

impl ContentIndexer {
    /// Creates an indexer over owned collaborators.
    pub fn new(source: impl DocumentSource + 'static, resolver: impl HtmlResolver + 'static) -> Self {
        Self::from_shared(Arc::new(source), Arc::new(resolver))
    }

    /// Creates an indexer over shared collaborators.
    ///
    /// Useful when the caller keeps its own handle on the source or
    /// resolver, e.g. to swap a [`StaticSource`](crate::source::StaticSource)
    /// document between runs.
    pub fn from_shared(source: Arc<dyn DocumentSource>, resolver: Arc<dyn HtmlResolver>) -> Self {
        Self {
            source,
            resolver,
            published: RwLock::new(Arc::from(Vec::new())),
            indexed: AtomicBool::new(false),
            reindex_gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Returns the current published set.
    ///
    /// Never blocks: the read lock is held only for a pointer clone. Before
    /// the first successful re-index this returns an empty slice, regardless
    /// of what the source document contains. The returned snapshot is
    /// stable — later re-index runs replace the indexer's pointer, they do
    /// not mutate the slice a caller already holds.
    pub fn content(&self) -> Arc<[Content]> {
        if !self.indexed.load(Ordering::Acquire) {
            return Arc::from(Vec::new());
        }
        Arc::clone(&self.published.read())
    }

    /// True once at least one re-index has succeeded.
    pub fn is_indexed(&self) -> bool {
        self.indexed.load(Ordering::Acquire)
    }

    /// Re-reads the source document, rebuilds the content set, and publishes
    /// it atomically.
    ///
    /// The run is all-or-nothing: any failure — unreadable source, document
    /// that is not a JSON array, an item with neither body nor reference
    /// key, a malformed image URL, a resolver error — aborts the whole run
    /// and leaves the previously published set untouched. There is no retry;
    /// re-triggering belongs to the notification source.
    #[tracing::instrument(skip(self), err)]
    pub async fn reindex(&self) -> Result<IndexSummary, IndexError> {
        let _serialized = self.reindex_gate.lock().await;

        let bytes = self.source.load().await?;
        let records: Vec<Value> = serde_json::from_slice(&bytes)?;
        tracing::debug!(records = records.len(), "content document parsed");

        // Build the replacement set on a private vector; nothing below is
        // visible to readers until the swap.
        let mut entries: Vec<Content> = Vec::with_capacity(records.len());
        let mut resolved = 0usize;
        for (index, value) in records.iter().enumerate() {
            let (entry, via_resolver) = self.build_entry(index, value).await?;
            if via_resolver {
                resolved += 1;
            }
            entries.push(entry);
        }

        let count = entries.len();
        let next: Arc<[Content]> = entries.into();
        let replaced = {
            let mut published = self.published.write();
            let previous = published.len();
            *published = next;
            previous
        };
        self.indexed.store(true, Ordering::Release);

        let summary = IndexSummary {
            entries: count,
            resolved,
            replaced,
            when: Utc::now(),
        };
        tracing::info!(
            entries = summary.entries,
            resolved = summary.resolved,
            replaced = summary.replaced,
            "content set published"
        );
        Ok(summary)
    }

    /// Converts one document element into a content entry, resolving the
    /// body through the injected resolver when it is not inline.
    async fn build_entry(&self, index: usize, value: &Value) -> Result<(Content, bool), IndexError> {
        let record = ItemRecord::from_value(value);

        let (html, via_resolver) = match (record.html, record.html_ref) {
            // Inline HTML wins; the resolver is never consulted for it.
            (Some(inline), _) => (inline, false),
            (None, Some(key)) => {
                let html = self.resolver.resolve(&key).await.map_err(|source| {
                    IndexError::Resolver {
                        index,
                        key: key.clone(),
                        source,
                    }
                })?;
                if html.trim().is_empty() {
                    return Err(IndexError::Resolver {
                        index,
                        key,
                        source: ResolverError::new("resolver returned an empty HTML body"),
                    });
                }
                (html, true)
            }
            (None, None) => {
                return Err(IndexError::Validation {
                    index,
                    title: record.title,
                });
            }
        };

        let image_url = match record.image_url {
            None => None,
            Some(value) => Some(Url::parse(&value).map_err(|source| IndexError::ImageUrl {
                index,
                value,
                source,
            })?),
        };

        Ok((
            Content {
                title: record.title,
                html,
                image_url,
            },
            via_resolver,
        ))
    }
}
