//! Shared logging setup for the therabook binaries.

use tracing_subscriber::EnvFilter;

/// Install the process-wide tracing subscriber.
///
/// Emits JSON lines, filtered via `RUST_LOG` (default `info`). Safe to call
/// more than once; only the first call installs a subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
