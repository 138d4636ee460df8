//! Reindex demo: a swappable in-memory document and a map resolver, driven
//! by trigger notifications.
//!
//! What you'll see:
//! 1. The empty set readers get before the first successful run
//! 2. A notification publishing the initial content set
//! 3. A regenerated document replacing the set wholesale
//! 4. A broken document failing its run while readers keep the last good set
//!
//! Running this demo:
//! ```bash
//! cargo run --example reindex_demo
//! ```

use std::sync::Arc;
use std::time::Duration;

use contentsmith::telemetry::{init_miette, init_tracing};
use contentsmith::{ContentIndexer, MapResolver, ReindexTrigger, StaticSource};
use miette::Result;
use tracing::info;

const FIRST_DOCUMENT: &str = r#"[
  {"title": "Getting Started", "html": "<p>welcome</p>"},
  {"title": "Episode 42", "htmlRef": "episode-42", "imageUrl": "https://example.com/e42.png"}
]"#;

const SECOND_DOCUMENT: &str = r#"[
  {"title": "Getting Started", "html": "<p>welcome back</p>"},
  {"title": "Episode 42", "htmlRef": "episode-42"},
  {"title": "Season Finale", "html": "<p>that is a wrap</p>"}
]"#;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    init_miette();

    let source = Arc::new(StaticSource::new(FIRST_DOCUMENT));
    let resolver = MapResolver::new().with_entry("episode-42", "<p>all about content indexing</p>");
    let indexer = Arc::new(ContentIndexer::from_shared(
        source.clone(),
        Arc::new(resolver),
    ));

    info!(
        "before the first run readers see {} entries",
        indexer.content().len()
    );

    let trigger = ReindexTrigger::new(Arc::clone(&indexer));
    trigger.listen();
    let notifier = trigger.notifier();

    // First notification publishes the initial set.
    notifier.notify();
    tokio::time::sleep(Duration::from_millis(50)).await;
    dump(&indexer);

    // A regenerated document replaces the set wholesale on the next trigger.
    source.replace(SECOND_DOCUMENT);
    notifier.notify();
    tokio::time::sleep(Duration::from_millis(50)).await;
    dump(&indexer);

    // A broken document fails its run; readers keep the last good set.
    source.replace(r#"[{"title": "missing body"}]"#);
    notifier.notify();
    tokio::time::sleep(Duration::from_millis(50)).await;
    dump(&indexer);

    trigger.stop_listener().await;
    Ok(())
}

fn dump(indexer: &ContentIndexer) {
    let content = indexer.content();
    info!("published set: {} entries", content.len());
    for entry in content.iter() {
        info!(
            "  {} ({} bytes of HTML)",
            entry.title.as_deref().unwrap_or("<untitled>"),
            entry.html.len()
        );
    }
}
