//! MCP (Model Context Protocol) server implementation
//!
//! Exposes the Folio document operations as tools over newline-delimited
//! JSON-RPC 2.0 on stdin/stdout.
//!
//! CRITICAL: stdout is reserved EXCLUSIVELY for JSON-RPC responses.
//! All logs (Info/Warn/Error) MUST go to stderr to avoid protocol corruption.

pub mod tools;

use folio_core::ConfigService;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use tokio::runtime::Runtime;

/// MCP protocol revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

/// JSON-RPC request
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error object
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

#[derive(Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Tool server bound to one config service
#[derive(Clone)]
pub struct McpServer {
    service: ConfigService,
}

impl McpServer {
    pub fn new(service: ConfigService) -> Self {
        Self { service }
    }

    /// Handle a single JSON-RPC message
    ///
    /// Returns `None` for notifications, which never get a response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        // Log to stderr only
        tracing::info!(target: "mcp", method = %request.method, "Handling MCP request");

        let Some(id) = request.id.filter(|id| !id.is_null()) else {
            tracing::debug!(method = %request.method, "Ignoring notification");
            return None;
        };
        let id = Some(id);

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                id,
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, json!({ "tools": &*tools::TOOLS })),
            "tools/call" => self.handle_tool_call(id, request.params).await,
            other => JsonRpcResponse::failure(
                id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", other),
            ),
        };
        Some(response)
    }

    async fn handle_tool_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: CallParams = match params.map(serde_json::from_value) {
            Some(Ok(p)) => p,
            Some(Err(e)) => {
                return JsonRpcResponse::failure(id, INVALID_PARAMS, format!("Invalid params: {}", e))
            }
            None => return JsonRpcResponse::failure(id, INVALID_PARAMS, "Missing params"),
        };

        if !tools::is_known_tool(&params.name) {
            return JsonRpcResponse::failure(
                id,
                INVALID_PARAMS,
                format!("Unknown tool: {}", params.name),
            );
        }

        let result = tools::call_tool(&self.service, &params.name, params.arguments).await;
        JsonRpcResponse::success(id, result)
    }

    /// Serve newline-delimited requests from `input` until it closes
    ///
    /// Each request is driven to completion on `rt` before the next line is
    /// read.
    pub fn serve<R: BufRead, W: Write>(&self, rt: &Runtime, input: R, mut output: W) -> std::io::Result<()> {
        for line in input.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    return Err(e);
                }
            };

            if line.trim().is_empty() {
                continue;
            }

            tracing::debug!("Received: {}", line);

            let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => rt.block_on(self.handle_request(request)),
                Err(e) => {
                    tracing::error!("Failed to parse request: {}", e);
                    Some(JsonRpcResponse::failure(None, PARSE_ERROR, format!("Parse error: {}", e)))
                }
            };

            // Notifications don't get responses
            let Some(response) = response else { continue };

            let response_json = match serde_json::to_string(&response) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize response: {}", e);
                    continue;
                }
            };

            tracing::debug!("Sending: {}", response_json);
            writeln!(output, "{}", response_json)?;
            output.flush()?;
        }
        Ok(())
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": { "listChanged": false } },
        "serverInfo": {
            "name": "folio",
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}
