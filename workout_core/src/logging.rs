//! Tracing setup shared by the `liftwave` binary and the library tests.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber: compact fmt output, level taken from
/// `RUST_LOG` when set, `info` otherwise.
pub fn init() {
    init_with_level("info")
}

/// Install the global subscriber with an explicit fallback level for
/// when `RUST_LOG` is unset.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Capture-friendly setup for unit tests; repeated calls are harmless.
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
