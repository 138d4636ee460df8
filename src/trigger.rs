//! Re-index trigger plumbing.
//!
//! Deciding *when* to re-index belongs to an external event source. A
//! [`ReindexTrigger`] gives that source a cloneable, non-blocking
//! [`ReindexNotifier`]; a background listener drains notifications into
//! `reindex()` calls on the shared indexer, so triggers delivered while a
//! run is in flight queue up rather than overlap. A failed run is logged
//! and otherwise ignored — readers keep the previously published set, and
//! whether to re-trigger is the event source's call.

use std::sync::{Arc, Mutex};

use tokio::{sync::oneshot, task};

use crate::indexer::ContentIndexer;

/// Cloneable handle an external event source uses to request a re-index.
#[derive(Clone)]
pub struct ReindexNotifier {
    sender: flume::Sender<()>,
}

impl ReindexNotifier {
    /// Requests a re-index. Never blocks.
    ///
    /// Returns `false` when the owning [`ReindexTrigger`] has been dropped
    /// and the notification can no longer be delivered.
    pub fn notify(&self) -> bool {
        self.sender.send(()).is_ok()
    }
}

/// Owns the notification channel and the background listener task.
pub struct ReindexTrigger {
    indexer: Arc<ContentIndexer>,
    channel: (flume::Sender<()>, flume::Receiver<()>),
    listener: Mutex<Option<ListenerState>>,
}

struct ListenerState {
    shutdown_tx: oneshot::Sender<()>,
    handle: task::JoinHandle<()>,
}

impl ReindexTrigger {
    pub fn new(indexer: Arc<ContentIndexer>) -> Self {
        Self {
            indexer,
            channel: flume::unbounded(),
            listener: Mutex::new(None),
        }
    }

    /// Hands out a notifier for external event sources.
    pub fn notifier(&self) -> ReindexNotifier {
        ReindexNotifier {
            sender: self.channel.0.clone(),
        }
    }

    /// Spawns the background task that drains notifications into re-index
    /// runs. Idempotent: calling multiple times has no effect.
    pub fn listen(&self) {
        let mut guard = self.listener.lock().expect("listener poisoned");
        if guard.is_some() {
            return; // Already listening
        }

        let receiver = self.channel.1.clone();
        let indexer = Arc::clone(&self.indexer);
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let handle = task::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    recv = receiver.recv_async() => match recv {
                        Err(_) => {
                            tracing::debug!("notification channel closed");
                            break;
                        }
                        Ok(()) => match indexer.reindex().await {
                            Ok(summary) => {
                                tracing::info!(
                                    entries = summary.entries,
                                    resolved = summary.resolved,
                                    "triggered reindex complete"
                                );
                            }
                            Err(error) => {
                                tracing::warn!(
                                    %error,
                                    "triggered reindex failed; previous content set retained"
                                );
                            }
                        },
                    }
                }
            }
        });

        *guard = Some(ListenerState {
            shutdown_tx,
            handle,
        });
    }

    /// Stops the background listener task, waiting for an in-flight run to
    /// finish.
    pub async fn stop_listener(&self) {
        let state = {
            let mut guard = self.listener.lock().expect("listener poisoned");
            guard.take()
        };
        if let Some(state) = state {
            let _ = state.shutdown_tx.send(());
            let _ = state.handle.await;
        }
    }
}

impl Drop for ReindexTrigger {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.listener.lock() {
            if let Some(state) = guard.take() {
                let _ = state.shutdown_tx.send(());
                state.handle.abort();
            }
        }
    }
}
