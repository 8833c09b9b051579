//! Tracing subscriber setup.

use ms_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` wins over `config.filter`. Returns false if a global
/// subscriber was already installed (by an earlier call or by the host
/// application), which is not treated as an error.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|e| {
            eprintln!("invalid log filter '{}': {e}; falling back to 'info'", config.filter);
            EnvFilter::new("info")
        });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
