mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use common::{MIXED_DOCUMENT, static_indexer, wait_until};
use contentsmith::{ContentIndexer, ReindexTrigger, ResolverError, StaticSource};

#[tokio::test]
async fn notification_drives_a_reindex() {
    let (indexer, _source) = static_indexer(MIXED_DOCUMENT);
    let trigger = ReindexTrigger::new(Arc::clone(&indexer));
    trigger.listen();

    let notifier = trigger.notifier();
    assert!(notifier.notify());

    wait_until("the triggered run publishes", || indexer.is_indexed()).await;
    assert_eq!(indexer.content().len(), 3);
    trigger.stop_listener().await;
}

#[tokio::test]
async fn failed_triggered_runs_leave_the_set_untouched() {
    let (indexer, source) = static_indexer(MIXED_DOCUMENT);
    let trigger = ReindexTrigger::new(Arc::clone(&indexer));
    trigger.listen();
    let notifier = trigger.notifier();

    notifier.notify();
    wait_until("the initial publish", || indexer.is_indexed()).await;

    source.replace(r#"[{"title": "no body"}]"#);
    notifier.notify();
    // Give the listener time to run the failing attempt.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(indexer.content().len(), 3);

    source.replace(r#"[{"html": "<p>fixed</p>"}]"#);
    notifier.notify();
    wait_until("the recovered publish", || indexer.content().len() == 1).await;
    trigger.stop_listener().await;
}

#[tokio::test]
async fn listen_is_idempotent() {
    // One triggered run resolves the single reference key exactly once,
    // however many times listen() was called.
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let resolver = move |key: &str| -> Result<String, ResolverError> {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(format!("<p>{key}</p>"))
    };
    let indexer = Arc::new(ContentIndexer::new(
        StaticSource::new(r#"[{"htmlRef": "only"}]"#),
        resolver,
    ));

    let trigger = ReindexTrigger::new(Arc::clone(&indexer));
    trigger.listen();
    trigger.listen();
    trigger.listen();

    trigger.notifier().notify();
    wait_until("the triggered publish", || indexer.is_indexed()).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    trigger.stop_listener().await;
}

#[tokio::test]
async fn notify_reports_a_dropped_trigger() {
    let (indexer, _source) = static_indexer(MIXED_DOCUMENT);
    let trigger = ReindexTrigger::new(indexer);
    let notifier = trigger.notifier();
    assert!(notifier.notify());

    drop(trigger);
    assert!(!notifier.notify());
}

#[tokio::test]
async fn stopping_without_notifications_is_a_noop() {
    let (indexer, _source) = static_indexer("[]");
    let trigger = ReindexTrigger::new(indexer);
    trigger.listen();
    trigger.stop_listener().await;
}
