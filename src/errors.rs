//! Re-index failure taxonomy.
//!
//! Every variant aborts the whole run: nothing is recovered locally, no
//! retry is attempted, and the previously published set stays visible to
//! readers. Re-triggering after a failure belongs to the external
//! notification source, not to this crate.

use miette::Diagnostic;
use thiserror::Error;

use crate::resolver::ResolverError;
use crate::source::SourceError;

/// A failed re-index attempt.
#[derive(Debug, Error, Diagnostic)]
pub enum IndexError {
    /// The document source could not produce the current bytes.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] SourceError),

    /// The document is not a JSON array of objects.
    #[error("content document is not a JSON array: {source}")]
    #[diagnostic(
        code(contentsmith::index::parse),
        help("The source document must be a JSON array; each element is one content descriptor.")
    )]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// An item carried neither an inline HTML body nor a reference key.
    #[error("item {index} provides neither an HTML body nor a key the HTML may be resolved by")]
    #[diagnostic(
        code(contentsmith::index::validation),
        help("Give each item a non-blank `html` or `htmlRef` field.")
    )]
    Validation {
        index: usize,
        title: Option<String>,
    },

    /// An item's image URL did not parse as an absolute URL.
    #[error("item {index} has a malformed image URL '{value}'")]
    #[diagnostic(
        code(contentsmith::index::image_url),
        help("`imageUrl` must be an absolute URL, e.g. https://example.com/cover.png.")
    )]
    ImageUrl {
        index: usize,
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTML resolver failed for an item's reference key.
    #[error("failed to resolve HTML for reference key '{key}' (item {index})")]
    #[diagnostic(code(contentsmith::index::resolver))]
    Resolver {
        index: usize,
        key: String,
        #[source]
        source: ResolverError,
    },
}
