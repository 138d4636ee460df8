//! # Contentsmith: Triggered Content Indexing with Atomic Publication
//!
//! Contentsmith ingests a batch of content descriptors from a JSON document,
//! resolves each descriptor's HTML body (inline or through an injected
//! lookup), validates the result, and publishes the collection atomically
//! for concurrent readers.
//!
//! ## Core Concepts
//!
//! - **Content entries**: validated, resolved units of publishable data
//! - **Document source**: injected capability supplying the raw JSON bytes
//! - **HTML resolver**: injected capability mapping reference keys to HTML
//! - **Re-index**: the all-or-nothing rebuild-and-publish operation
//! - **Trigger**: notification plumbing that drives re-index from an
//!   external event source
//!
//! ## Quick Start
//!
//! ```rust
//! use contentsmith::{ContentIndexer, MapResolver, StaticSource};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let document = r#"[
//!     {"title": "Getting Started", "html": "<p>welcome</p>"},
//!     {"title": "Deep Dive", "htmlRef": "episode-2"}
//! ]"#;
//!
//! let indexer = ContentIndexer::new(
//!     StaticSource::new(document),
//!     MapResolver::new().with_entry("episode-2", "<p>the deep dive</p>"),
//! );
//!
//! // Readers see nothing until the first successful re-index.
//! assert!(indexer.content().is_empty());
//!
//! indexer.reindex().await.expect("valid document");
//!
//! let content = indexer.content();
//! assert_eq!(content.len(), 2);
//! assert_eq!(content[1].html, "<p>the deep dive</p>");
//! # }
//! ```
//!
//! ## Failure Semantics
//!
//! A re-index run is all-or-nothing. Any failure — unreadable source,
//! non-array document, an item with neither `html` nor `htmlRef`, a
//! malformed `imageUrl`, a resolver error — aborts the run and readers keep
//! the previously published set. See [`errors::IndexError`] for the
//! taxonomy.
//!
//! ## Module Guide
//!
//! - [`content`] - Content entries and raw item records
//! - [`indexer`] - The indexer core: read accessor and re-index operation
//! - [`source`] - Document source seam and implementations
//! - [`resolver`] - HTML resolver seam and implementations
//! - [`trigger`] - Notification channel and background listener
//! - [`errors`] - Re-index failure taxonomy
//! - [`telemetry`] - Tracing bootstrap for demos and hosts

pub mod content;
pub mod errors;
pub mod indexer;
pub mod resolver;
pub mod source;
pub mod telemetry;
pub mod trigger;

pub use content::Content;
pub use errors::IndexError;
pub use indexer::{ContentIndexer, IndexSummary};
pub use resolver::{HtmlResolver, MapResolver, ResolverError};
pub use source::{DocumentSource, FileSource, SourceError, StaticSource};
pub use trigger::{ReindexNotifier, ReindexTrigger};
