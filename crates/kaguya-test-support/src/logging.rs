//! Test subscriber so `tracing` output shows up under `cargo test -- --nocapture`.

use tracing_subscriber::EnvFilter;

/// Install a test-writer subscriber once per process; later calls are no-ops.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    // A second install in the same binary fails harmlessly.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
