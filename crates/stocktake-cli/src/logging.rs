//! Logging setup.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Install the global subscriber, reporting a failure on stderr.
///
/// `RUST_LOG` wins over the configured filter. `log` records from the store
/// and auth crates are bridged into the same output.
pub fn init(default_filter: &str) {
    if let Err(e) = try_init(default_filter) {
        eprintln!("Warning: logging is not initialized: {e}");
    }
}

/// Install the global subscriber.
///
/// Fails when a subscriber or `log` bridge is already installed.
pub fn try_init(default_filter: &str) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish()
        .try_init()
}
