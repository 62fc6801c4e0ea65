//! Logging setup shared by every Folio binary
//!
//! Log lines always go to stderr: the MCP transport owns stdout.

use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug,hyper=info,reqwest=info,tower_http=debug"
    } else {
        "info,tower_http=info"
    }
}

/// Install the global subscriber (compact text, or JSON lines)
///
/// A second call in the same process is reported on stderr and ignored.
///
/// ```
/// folio_common::telemetry::init_tracing(false, false);
/// tracing::info!("Application started");
/// ```
pub fn init_tracing(verbose: bool, json_format: bool) {
    if let Err(e) = try_init_tracing(verbose, json_format) {
        eprintln!("Logging already initialized: {}", e);
    }
}

/// Like [`init_tracing`], but hands back the installation error
pub fn try_init_tracing(verbose: bool, json_format: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    let output = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    if json_format {
        registry.with(output.json().with_current_span(false)).try_init()
    } else {
        registry.with(output.with_target(false).compact()).try_init()
    }
}
