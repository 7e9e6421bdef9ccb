//! # Telemetry
//!
//! Tracing subscriber setup for binaries embedding the shop.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=antojo=trace` - Show trace for antojo crates only
/// - Default: INFO level, DEBUG for antojo crates
///
/// Call once at process startup; a second call panics because the global
/// subscriber is already set.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,antojo=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}
