//! Error types for the toolbox server

use thiserror::Error;

/// Result type alias for toolbox operations
pub type Result<T> = std::result::Result<T, ToolboxError>;

/// JSON-RPC reserved error codes
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INTERNAL_ERROR: i64 = -32603;
}

/// Main error type for the toolbox server
///
/// Tool-level failures (divide by zero, unknown tool) never show up here:
/// those are ordinary `ToolCallResult`s with `isError` set. This enum only
/// carries protocol and infrastructure faults.
#[derive(Error, Debug)]
pub enum ToolboxError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid Request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ToolboxError {
    /// Get error code for the JSON-RPC envelope
    pub fn code(&self) -> i64 {
        match self {
            ToolboxError::Parse(_) => codes::PARSE_ERROR,
            ToolboxError::InvalidRequest(_) => codes::INVALID_REQUEST,
            ToolboxError::MethodNotFound(_) => codes::METHOD_NOT_FOUND,
            _ => codes::INTERNAL_ERROR,
        }
    }
}
