//! Standalone HTTP API server.

use anyhow::Result;
use folio_common::{telemetry, EXIT_ERROR};
use folio_config::Config;
use folio_http::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing(false, false);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    };

    let state = AppState::from_config(&config)?;
    folio_http::serve(&config.bind_addr(), state).await
}
