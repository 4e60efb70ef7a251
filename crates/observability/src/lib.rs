//! Process-wide logging setup.

/// Tracing subscriber configuration and installation.
pub mod tracing;

pub use crate::tracing::{LogFormat, LogSettings};

/// Initialize process-wide tracing from the environment.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    crate::tracing::init(&LogSettings::from_env());
}
