//! Test logging configuration
//!
//! Routes `tracing` output through the test writer so it only shows up for
//! failing tests (or with `--nocapture`).

use std::sync::Once;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

static INIT: Once = Once::new();

/// Install a test subscriber filtered at `level` (`RUST_LOG` wins if set)
///
/// Only the first call in a test binary has any effect.
///
/// ```rust
/// folio_test_helpers::logging::init_test_logging("folio_core=debug");
/// tracing::debug!("visible with --nocapture");
/// ```
pub fn init_test_logging(level: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_test_writer()
            .finish();

        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Only errors are logged
pub fn suppress_logs() {
    init_test_logging("error");
}
