//! Structured logging setup.

use crate::config::Config;
use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber that writes to stderr.
///
/// An invalid directive falls back to `warn`. Installing twice is a no-op, so
/// tests and embedders may call this freely.
pub fn init(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
