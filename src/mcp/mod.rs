//! MCP (Model Context Protocol) server implementation
//!
//! Tool catalog, argument validation, executors and the JSON-RPC router.
//! Transports (HTTP, stdio) call into [`JsonRpcRouter`] and [`ToolRegistry`].

pub mod dispatch;
pub mod executor;
pub mod protocol;
pub mod router;
pub mod tools;
pub mod validate;

pub use dispatch::ToolRegistry;
pub use executor::{Clock, FixedClock, SystemClock};
pub use protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, McpServer, ServerInfo,
    ToolCallResult, ToolContent, ToolDefinition,
};
pub use router::JsonRpcRouter;
pub use tools::{get_tool_definitions, TOOL_DEFINITIONS};
pub use validate::{validate, NormalizedArgs, ValidationError};
