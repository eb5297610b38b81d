//! Tracing subscriber setup for embedders and tests.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// Respects the `ENGRAM_LOG` environment variable for filtering and
/// defaults to `info`. Calling twice is a no-op, so tests and embedding
/// hosts can both call it freely.
pub fn init() {
    let filter = EnvFilter::try_from_env("ENGRAM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

/// Initialize with a fixed filter string, ignoring the environment.
pub fn init_with_filter(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .try_init();
}
