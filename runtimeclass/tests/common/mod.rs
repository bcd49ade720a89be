//! Shared setup for integration tests.

use tracing_subscriber::{EnvFilter, fmt};

/// Install a test-writer tracing subscriber once per test binary.
///
/// Reads `RUST_LOG`; defaults to `warn`. Safe to call from every test.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .compact()
        .try_init();
}
