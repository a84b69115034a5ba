//! Time and logging helpers.

use std::time::{SystemTime, UNIX_EPOCH};
use tracing::Level;

/// Milliseconds since the Unix epoch, or 0 if the system clock is before it.
#[must_use]
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Installs a global `tracing` subscriber writing to stdout.
///
/// The level is read from the `LOGLEVEL` environment variable (`TRACE`,
/// `DEBUG`, `INFO`, `WARN` or `ERROR`) and defaults to `INFO`. Calling it
/// again once a subscriber is installed has no effect.
pub fn setup_logger() {
    let level = std::env::var("LOGLEVEL")
        .ok()
        .and_then(|value| value.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    if tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init()
        .is_ok()
    {
        tracing::debug!("log level set to {}", level);
    }
}
