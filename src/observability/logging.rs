//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Seed the filter from the configured log level, letting RUST_LOG win

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `level` is the configured default (e.g. "info"); the RUST_LOG
/// environment variable takes precedence when set.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chain_switch={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
