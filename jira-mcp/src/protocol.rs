//! MCP protocol message types and JSON-RPC handling

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC request message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
  pub jsonrpc: String,
  pub id: Option<Value>,
  pub method: String,
  pub params: Option<Value>,
}

/// JSON-RPC response message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
  pub jsonrpc: String,
  pub id: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub result: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
  pub fn success(id: Option<Value>, result: Value) -> Self {
    Self {
      jsonrpc: "2.0".to_string(),
      id,
      result: Some(result),
      error: None,
    }
  }

  pub fn failure(id: Option<Value>, error: JsonRpcError) -> Self {
    Self {
      jsonrpc: "2.0".to_string(),
      id,
      result: None,
      error: Some(error),
    }
  }
}

/// JSON-RPC error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
  pub code: i32,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<Value>,
}

impl JsonRpcError {
  pub fn parse_error(message: impl Into<String>) -> Self {
    Self {
      code: -32700,
      message: message.into(),
      data: None,
    }
  }

  pub fn method_not_found(message: impl Into<String>) -> Self {
    Self {
      code: -32601,
      message: message.into(),
      data: None,
    }
  }

  pub fn invalid_params(message: impl Into<String>) -> Self {
    Self {
      code: -32602,
      message: message.into(),
      data: None,
    }
  }

  pub fn internal_error(message: impl Into<String>) -> Self {
    Self {
      code: -32603,
      message: message.into(),
      data: None,
    }
  }
}

/// MCP server capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerCapabilities {
  pub tools: ToolsCapability,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsCapability {
  #[serde(rename = "listChanged")]
  pub list_changed: bool,
}

/// Initialize response result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
  #[serde(rename = "protocolVersion")]
  pub protocol_version: String,
  pub capabilities: ServerCapabilities,
  #[serde(rename = "serverInfo")]
  pub server_info: ServerInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
  pub name: String,
  pub version: String,
}

/// Tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
  pub name: String,
  pub description: String,
  #[serde(rename = "inputSchema")]
  pub input_schema: Value,
}

/// Tool call parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolParams {
  pub name: String,
  #[serde(default)]
  pub arguments: Option<Value>,
}

/// Tool call result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallToolResult {
  pub content: Vec<ToolContent>,
  #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
  pub is_error: Option<bool>,
}

impl CallToolResult {
  /// A successful result holding a single text block.
  pub fn text(text: impl Into<String>) -> Self {
    Self {
      content: vec![ToolContent::Text { text: text.into() }],
      is_error: Some(false),
    }
  }

  /// An error result holding a single text block.
  pub fn error(text: impl Into<String>) -> Self {
    Self {
      content: vec![ToolContent::Text { text: text.into() }],
      is_error: Some(true),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
  #[serde(rename = "text")]
  Text { text: String },
}

/// List tools result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListToolsResult {
  pub tools: Vec<Tool>,
}
