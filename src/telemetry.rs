//! Tracing and diagnostics bootstrap shared by demos and long-running hosts.
//!
//! Libraries embedding the indexer normally install their own subscriber;
//! these helpers exist so demos and small hosts get the same setup without
//! repeating it.

use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the env-filtered fmt subscriber with span-lifecycle events and
/// the error layer. A no-op when a global subscriber is already set.
pub fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        // Log span open/close so instrumented reindex runs are visible.
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,contentsmith=info"))
        .expect("default env filter is valid");

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init();
}

/// Pretty panic reports via miette.
pub fn init_miette() {
    miette::set_panic_hook();
}
