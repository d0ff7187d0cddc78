//! Tracing/logging setup shared by the workspace binaries.

/// Initialize process-wide tracing with the default configuration.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(&tracing::LogConfig::from_env());
}

/// Tracing configuration (filters, format).
pub mod tracing;

pub use self::tracing::{LogConfig, LogFormat};
