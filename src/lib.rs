//! MCP Toolbox - Model Context Protocol tool server
//!
//! A small registry of stateless tools exposed over a REST surface and a
//! JSON-RPC 2.0 envelope, with an optional stdio transport.

pub mod config;
pub mod error;
pub mod http;
pub mod mcp;
pub mod types;

pub use config::ServerConfig;
pub use error::{Result, ToolboxError};
pub use mcp::{JsonRpcRouter, ToolRegistry};
pub use types::*;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
