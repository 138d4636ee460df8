use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use contentsmith::{ContentIndexer, DocumentSource, MapResolver, SourceError, StaticSource};

/// Two inline items around one resolver-backed item.
pub const MIXED_DOCUMENT: &str = r#"[
  {"title": "Getting Started", "html": "<p>welcome</p>", "imageUrl": "https://example.com/start.png"},
  {"htmlRef": "episode-2"},
  {"title": "Wrap Up", "html": "<p>closing notes</p>"}
]"#;

/// Resolver knowing the reference keys the fixture documents use.
pub fn demo_resolver() -> MapResolver {
    MapResolver::new()
        .with_entry("episode-2", "<p>the second episode</p>")
        .with_entry("episode-3", "<p>the third episode</p>")
}

/// Indexer over a swappable in-memory document. The source handle is
/// returned so tests can regenerate the document between runs.
pub fn static_indexer(document: &str) -> (Arc<ContentIndexer>, Arc<StaticSource>) {
    let source = Arc::new(StaticSource::new(document));
    let indexer = ContentIndexer::from_shared(source.clone(), Arc::new(demo_resolver()));
    (Arc::new(indexer), source)
}

/// A JSON array of `count` inline-HTML items titled `item-0..`.
pub fn inline_document(count: usize) -> String {
    let items: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "title": format!("item-{i}"),
                "html": format!("<p>body {i}</p>"),
            })
        })
        .collect();
    serde_json::Value::Array(items).to_string()
}

/// Document source that can be switched into a failing state.
pub struct FlakySource {
    inner: StaticSource,
    failing: AtomicBool,
}

impl FlakySource {
    pub fn new(document: &str) -> Self {
        Self {
            inner: StaticSource::new(document),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentSource for FlakySource {
    async fn load(&self) -> Result<Vec<u8>, SourceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SourceError::unavailable("simulated outage"));
        }
        self.inner.load().await
    }
}
