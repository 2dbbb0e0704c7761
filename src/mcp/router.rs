//! JSON-RPC method router
//!
//! Maps an envelope's `method` to a registry operation and wraps the outcome
//! in a response. `route` is total: every request yields exactly one of
//! `result` or `error`.

use std::sync::Arc;

use serde_json::{json, Value};

use super::dispatch::ToolRegistry;
use super::protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, ServerInfo, JSONRPC_VERSION,
};
use super::validate::value_type_name;
use crate::error::{Result, ToolboxError};
use crate::types::render_value;

/// Routes `tools/list`, `tools/call` and the MCP handshake methods
#[derive(Debug, Clone)]
pub struct JsonRpcRouter {
    registry: Arc<ToolRegistry>,
    server_info: ServerInfo,
}

impl JsonRpcRouter {
    pub fn new(registry: Arc<ToolRegistry>, server_info: ServerInfo) -> Self {
        Self {
            registry,
            server_info,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    /// Handle one envelope
    pub fn route(&self, request: McpRequest) -> McpResponse {
        let id = request.id.clone();
        let method = request.method_name();

        match self.dispatch(request) {
            Ok(result) => McpResponse::success(id, result),
            Err(err) => {
                if matches!(err, ToolboxError::MethodNotFound(_)) {
                    tracing::warn!(method = %method, "{}", err);
                } else {
                    tracing::error!(method = %method, "Messages endpoint error: {}", err);
                }
                McpResponse::from_error(id, err)
            }
        }
    }

    fn dispatch(&self, request: McpRequest) -> Result<Value> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(ToolboxError::InvalidRequest(format!(
                "jsonrpc must be \"{}\", got \"{}\"",
                JSONRPC_VERSION, request.jsonrpc
            )));
        }

        let params = request.params.unwrap_or_else(|| json!({}));
        tracing::info!(method = %render_value(&request.method), params = %params, "MCP Message");

        match request.method.as_str() {
            Some(methods::LIST_TOOLS) => Ok(json!({ "tools": self.registry.list_tools() })),
            Some(methods::CALL_TOOL) => self.call_tool(&params),
            Some(methods::INITIALIZE) => Ok(serde_json::to_value(InitializeResult::from(
                &self.server_info,
            ))?),
            Some(methods::INITIALIZED) | Some(methods::PING) => Ok(json!({})),
            _ => Err(ToolboxError::MethodNotFound(render_value(&request.method))),
        }
    }

    /// Absent params were already defaulted to `{}`; a present but non-object
    /// `params` (including `null`) is an internal error. The tool name is taken
    /// as-is, so a missing or non-string name reaches the registry as an
    /// unknown tool.
    fn call_tool(&self, params: &Value) -> Result<Value> {
        let Value::Object(params) = params else {
            return Err(ToolboxError::Internal(format!(
                "params must be an object, got {}",
                value_type_name(params)
            )));
        };

        let name = render_value(params.get("name").unwrap_or(&Value::Null));
        let empty = json!({});
        let arguments = params.get("arguments").unwrap_or(&empty);

        let result = self.registry.execute(&name, arguments);
        Ok(serde_json::to_value(result)?)
    }
}

impl McpHandler for JsonRpcRouter {
    fn handle_request(&self, request: McpRequest) -> McpResponse {
        self.route(request)
    }
}
