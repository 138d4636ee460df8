mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use common::{inline_document, static_indexer};
use futures_util::future::join_all;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn readers_never_observe_a_partial_set() {
    let (indexer, source) = static_indexer(&inline_document(3));
    indexer.reindex().await.expect("initial publish");

    let stop = Arc::new(AtomicBool::new(false));
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let indexer = Arc::clone(&indexer);
            let stop = Arc::clone(&stop);
            tokio::spawn(async move {
                while !stop.load(Ordering::Relaxed) {
                    let len = indexer.content().len();
                    assert!(len == 3 || len == 8, "torn set of {len} entries");
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    // Alternate between the two document sizes while readers hammer the
    // accessor; any intermediate count fails the reader assertion.
    for round in 0..50 {
        let count = if round % 2 == 0 { 8 } else { 3 };
        source.replace(inline_document(count));
        indexer.reindex().await.expect("valid document");
    }

    stop.store(true, Ordering::Relaxed);
    for result in join_all(readers).await {
        result.expect("reader task");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn overlapping_reindex_runs_serialize() {
    let (indexer, _source) = static_indexer(&inline_document(5));

    let runs: Vec<_> = (0..8)
        .map(|_| {
            let indexer = Arc::clone(&indexer);
            tokio::spawn(async move { indexer.reindex().await })
        })
        .collect();

    for run in join_all(runs).await {
        run.expect("task").expect("reindex");
    }
    assert_eq!(indexer.content().len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failing_runs_are_invisible_to_concurrent_readers() {
    let (indexer, source) = static_indexer(&inline_document(4));
    indexer.reindex().await.expect("initial publish");

    let stop = Arc::new(AtomicBool::new(false));
    let reader = {
        let indexer = Arc::clone(&indexer);
        let stop = Arc::clone(&stop);
        tokio::spawn(async move {
            while !stop.load(Ordering::Relaxed) {
                assert_eq!(indexer.content().len(), 4, "reader saw a failed run");
                tokio::task::yield_now().await;
            }
        })
    };

    for _ in 0..25 {
        source.replace(r#"[{"title": "broken"}]"#);
        indexer.reindex().await.expect_err("invalid document");
    }

    stop.store(true, Ordering::Relaxed);
    reader.await.expect("reader task");
}
