//! Tracing initialization

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber
///
/// Emits JSON-formatted structured logs. The filter is taken from the
/// configured log level, falling back to `info` if it does not parse.
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
