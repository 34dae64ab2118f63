//! Line-delimited JSON-RPC server over stdio.
//!
//! The transport is deliberately thin: it frames messages, answers the
//! MCP handshake, and forwards `tools/call` to the dispatcher. All
//! tool-level failures are already folded into result payloads by the
//! time they reach this layer.

use anyhow::{Context, Result};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};

use crate::catalog::get_tools;
use crate::context::ServerContext;
use crate::protocol::{
  CallToolParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities,
  ServerInfo, ToolsCapability,
};
use crate::tools::call_tool;

const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server reading requests from stdin and writing responses to
/// stdout, one JSON document per line.
pub struct McpServer {
  context: ServerContext,
}

impl McpServer {
  pub fn new(context: ServerContext) -> Self {
    Self { context }
  }

  /// Serve until stdin closes.
  pub async fn run(&self) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    info!("jira-mcp server ready");

    while let Some(line) = lines.next_line().await.context("Failed to read from stdin")? {
      if line.trim().is_empty() {
        continue;
      }

      let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
        Ok(request) => self.handle_request(request).await,
        Err(e) => Some(JsonRpcResponse::failure(
          None,
          JsonRpcError::parse_error(format!("Invalid JSON-RPC request: {e}")),
        )),
      };

      if let Some(response) = response {
        let serialized = serde_json::to_string(&response).context("Failed to serialize response")?;
        stdout.write_all(serialized.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
      }
    }

    info!("stdin closed, shutting down");
    Ok(())
  }

  /// Handle a single request; notifications produce no response.
  pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    debug!(method = %request.method, "handling request");

    let is_notification = request.id.is_none();

    let response = match request.method.as_str() {
      "initialize" => {
        let result = InitializeResult {
          protocol_version: PROTOCOL_VERSION.to_string(),
          capabilities: ServerCapabilities {
            tools: ToolsCapability { list_changed: false },
          },
          server_info: ServerInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
          },
        };
        JsonRpcResponse::success(request.id, json!(result))
      }
      "notifications/initialized" | "notifications/cancelled" => return None,
      "ping" => JsonRpcResponse::success(request.id, json!({})),
      "tools/list" => {
        let result = ListToolsResult { tools: get_tools() };
        JsonRpcResponse::success(request.id, json!(result))
      }
      "tools/call" => match request.params.and_then(|p| serde_json::from_value::<CallToolParams>(p).ok()) {
        Some(params) => {
          let result = call_tool(&self.context, params).await;
          JsonRpcResponse::success(request.id, json!(result))
        }
        None => JsonRpcResponse::failure(
          request.id,
          JsonRpcError::invalid_params("tools/call requires a tool name and arguments object"),
        ),
      },
      other => JsonRpcResponse::failure(
        request.id,
        JsonRpcError::method_not_found(format!("Method not found: {other}")),
      ),
    };

    if is_notification { None } else { Some(response) }
  }
}
