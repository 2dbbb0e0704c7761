//! Server configuration

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolboxError};
use crate::mcp::ServerInfo;

/// Default server name reported by the info endpoint
pub const DEFAULT_SERVER_NAME: &str = "Azure-MCP-Functions-Server";
/// Default server version reported by the info endpoint
pub const DEFAULT_SERVER_VERSION: &str = "1.0.0";
/// Default HTTP port (Azure Functions local host port)
pub const DEFAULT_PORT: u16 = 7071;

/// How the server talks to its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Http,
    Stdio,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Runtime configuration for the server binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub transport: Transport,
    pub host: String,
    pub port: u16,
    /// Required key for every `/api/mcp` request; `None` disables auth
    pub function_key: Option<String>,
    pub cors: bool,
    pub server_name: String,
    pub server_version: String,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::Http,
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            function_key: None,
            cors: false,
            server_name: DEFAULT_SERVER_NAME.to_string(),
            server_version: DEFAULT_SERVER_VERSION.to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    /// Check the settings that would only fail later at bind or request time
    pub fn validate(&self) -> Result<()> {
        if self.transport == Transport::Http && self.port == 0 {
            return Err(ToolboxError::Config("port must be non-zero".to_string()));
        }
        if matches!(self.function_key.as_deref(), Some(key) if key.trim().is_empty()) {
            return Err(ToolboxError::Config(
                "function key must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Socket address to bind the HTTP listener on
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ToolboxError::Config(format!("invalid bind address: {}", e)))
    }

    /// Metadata advertised to clients
    pub fn server_info(&self) -> ServerInfo {
        ServerInfo::new(&self.server_name, &self.server_version)
    }
}
