//! Route tracing output from tests into the harness's captured output.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset: the workspace crates at `debug`,
/// dependencies (hyper, axum) at `warn`.
const DEFAULT_TEST_FILTER: &str = "warn,lla_core=debug,lla_test_utils=debug";

/// Install the test subscriber. Later calls in the same process do nothing.
pub fn init_test_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
