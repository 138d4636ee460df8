//! The document source seam.
//!
//! The indexer never knows where its JSON document lives. It asks an
//! injected [`DocumentSource`] for the current bytes at the start of every
//! re-index run, so a regenerated upstream document is picked up without any
//! coordination beyond the re-index trigger itself.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use miette::Diagnostic;
use parking_lot::RwLock;
use thiserror::Error;

/// Failure to produce the current document bytes.
#[derive(Debug, Error, Diagnostic)]
pub enum SourceError {
    /// The backing file could not be read.
    #[error("failed to read content document at {path}")]
    #[diagnostic(
        code(contentsmith::source::io),
        help("Check that the document exists and is readable.")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is unavailable for a reason of its own.
    #[error("content document unavailable: {reason}")]
    #[diagnostic(code(contentsmith::source::unavailable))]
    Unavailable { reason: String },
}

impl SourceError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Supplies the raw bytes of the current JSON document.
///
/// Called once per re-index invocation; the indexer treats a failure as
/// fatal for that run and leaves the previously published set in place.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn load(&self) -> Result<Vec<u8>, SourceError>;
}

/// File-backed source, re-read from disk on every load.
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves the document path from the `CONTENT_DOCUMENT` environment
    /// variable (a `.env` file is honored), defaulting to `content.json`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let path =
            std::env::var("CONTENT_DOCUMENT").unwrap_or_else(|_| "content.json".to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn load(&self) -> Result<Vec<u8>, SourceError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

/// In-memory source with swappable bytes.
///
/// Intended for tests and demos: the held document can be replaced between
/// re-index runs to simulate a regenerated upstream document.
#[derive(Debug, Default)]
pub struct StaticSource {
    bytes: RwLock<Vec<u8>>,
}

impl StaticSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: RwLock::new(bytes.into()),
        }
    }

    /// Replaces the document served by subsequent loads.
    pub fn replace(&self, bytes: impl Into<Vec<u8>>) {
        *self.bytes.write() = bytes.into();
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    async fn load(&self) -> Result<Vec<u8>, SourceError> {
        Ok(self.bytes.read().clone())
    }
}
