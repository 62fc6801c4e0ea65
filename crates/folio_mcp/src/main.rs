//! MCP Server Binary Entry Point
//!
//! Serves the Folio tools as JSON-RPC 2.0 over stdin/stdout.

use std::io;

use folio_common::{telemetry, EXIT_ERROR};
use folio_config::Config;
use folio_core::ConfigService;
use folio_mcp::McpServer;
use tokio::runtime::Runtime;

fn main() {
    // stderr only, stdout carries JSON-RPC
    telemetry::init_tracing(false, false);

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    };

    let service = match ConfigService::connect(&config) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to set up store: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    };

    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create Tokio runtime: {}", e);
            std::process::exit(EXIT_ERROR);
        }
    };

    tracing::info!("Folio MCP server starting...");

    let server = McpServer::new(service);
    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = server.serve(&rt, stdin.lock(), stdout.lock()) {
        tracing::error!("MCP transport failed: {}", e);
        std::process::exit(EXIT_ERROR);
    }

    tracing::info!("Folio MCP server shutting down");
}
