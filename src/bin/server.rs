//! MCP Toolbox server
//!
//! Run with: mcp-toolbox-server [--transport http|stdio]

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use toolbox::config::{LogFormat, ServerConfig, Transport, DEFAULT_PORT};
use toolbox::error::{Result, ToolboxError};
use toolbox::http::HttpServer;
use toolbox::mcp::{JsonRpcRouter, McpServer, ToolRegistry};

#[derive(Parser, Debug)]
#[command(name = "mcp-toolbox-server")]
#[command(about = "MCP tool server over HTTP or stdio")]
#[command(version)]
struct Args {
    /// Transport (http or stdio)
    #[arg(long, env = "MCP_TRANSPORT", default_value = "http")]
    transport: String,

    /// Address to bind the HTTP listener on
    #[arg(long, env = "MCP_HOST", default_value = "0.0.0.0")]
    host: String,

    /// HTTP port (falls back to FUNCTIONS_CUSTOMHANDLER_PORT, then 7071)
    #[arg(long, env = "MCP_PORT")]
    port: Option<u16>,

    /// Function key required on every request (unset = no auth)
    #[arg(long, env = "MCP_FUNCTION_KEY")]
    function_key: Option<String>,

    /// Allow cross-origin requests
    #[arg(long, env = "MCP_CORS")]
    cors: bool,

    /// Server name reported by /info and initialize
    #[arg(
        long,
        env = "MCP_SERVER_NAME",
        default_value = toolbox::config::DEFAULT_SERVER_NAME
    )]
    server_name: String,

    /// Server version reported by /info and initialize
    #[arg(
        long,
        env = "MCP_SERVER_VERSION",
        default_value = toolbox::config::DEFAULT_SERVER_VERSION
    )]
    server_version: String,

    /// Log format (text or json)
    #[arg(long, env = "MCP_LOG_FORMAT", default_value = "text")]
    log_format: String,
}

impl Args {
    fn into_config(self) -> Result<ServerConfig> {
        let transport = match self.transport.as_str() {
            "http" => Transport::Http,
            "stdio" => Transport::Stdio,
            other => {
                return Err(ToolboxError::Config(format!(
                    "unknown transport '{}'",
                    other
                )))
            }
        };

        let log_format = match self.log_format.as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => {
                return Err(ToolboxError::Config(format!(
                    "unknown log format '{}'",
                    other
                )))
            }
        };

        let port = match self.port {
            Some(port) => port,
            None => match std::env::var("FUNCTIONS_CUSTOMHANDLER_PORT") {
                Ok(raw) => raw.parse().map_err(|_| {
                    ToolboxError::Config(format!("invalid FUNCTIONS_CUSTOMHANDLER_PORT '{}'", raw))
                })?,
                Err(_) => DEFAULT_PORT,
            },
        };

        let config = ServerConfig {
            transport,
            host: self.host,
            port,
            function_key: self.function_key,
            cors: self.cors,
            server_name: self.server_name,
            server_version: self.server_version,
            log_format,
        };
        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(format: LogFormat) {
    // Logs go to stderr; stdout carries the stdio protocol
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .with(filter)
            .init(),
    }
}

fn main() -> Result<()> {
    let config = Args::parse().into_config()?;
    init_tracing(config.log_format);

    let registry = Arc::new(ToolRegistry::new());
    let router = JsonRpcRouter::new(registry, config.server_info());

    match config.transport {
        Transport::Stdio => {
            tracing::info!("MCP stdio server starting...");
            McpServer::new(router).run()?;
        }
        Transport::Http => {
            if config.function_key.is_none() {
                tracing::warn!("No function key configured; all requests are accepted");
            }
            let server = HttpServer::new(Arc::new(router), Arc::new(config))?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(server.start())?;
        }
    }

    Ok(())
}
