use std::io;
use std::time::Duration;

use anyhow::Result;
use folio_http::AppState;
use folio_mcp::McpServer;
use tokio::runtime::Runtime;

use super::open_service;

pub async fn cmd_serve(host: Option<String>, port: Option<u16>, memory: bool) -> Result<()> {
    let (mut config, service) = open_service(memory)?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let state = AppState::new(service).with_request_timeout(Duration::from_secs(
        config.server.request_timeout_secs,
    ));
    folio_http::serve(&config.bind_addr(), state).await
}

/// Runs on the caller's thread; each request is driven on `rt`
pub fn cmd_mcp(rt: &Runtime, memory: bool) -> Result<()> {
    let (_, service) = open_service(memory)?;

    // CRITICAL: stdout is reserved for JSON-RPC responses
    tracing::info!("MCP server started (reading from stdin)");

    let server = McpServer::new(service);
    server.serve(rt, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
