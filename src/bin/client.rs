//! MCP Toolbox client
//!
//! Talks to a running server over HTTP. `smoke` walks every endpoint once.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use toolbox::http::FUNCTION_KEY_HEADER;
use toolbox::mcp::{McpRequest, McpResponse, ToolCallResult};

#[derive(Parser)]
#[command(name = "mcp-toolbox-client")]
#[command(about = "Client for the MCP toolbox HTTP API")]
#[command(version)]
struct Cli {
    /// Base URL of the MCP API
    #[arg(
        long,
        env = "MCP_BASE_URL",
        default_value = "http://localhost:7071/api/mcp"
    )]
    base_url: String,

    /// Bearer token sent in the Authorization header
    #[arg(long, env = "MCP_ACCESS_TOKEN")]
    access_token: Option<String>,

    /// Function key sent in the x-functions-key header
    #[arg(long, env = "MCP_FUNCTION_KEY")]
    function_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check server health
    Health,
    /// Show server metadata
    Info,
    /// List available tools
    List,
    /// Call a tool through the REST endpoint
    Call {
        /// Tool name
        name: String,
        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
    /// Send a JSON-RPC message
    Message {
        /// Method name (tools/list, tools/call, ...)
        method: String,
        /// Params as a JSON object
        #[arg(short, long, default_value = "{}")]
        params: String,
    },
    /// Exercise every endpoint once
    Smoke,
}

struct McpClient {
    base_url: String,
    http: reqwest::Client,
}

impl McpClient {
    fn new(
        base_url: &str,
        access_token: Option<&str>,
        function_key: Option<&str>,
    ) -> anyhow::Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = access_token {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", token).parse()?,
            );
        }
        if let Some(key) = function_key {
            headers.insert(FUNCTION_KEY_HEADER, key.parse()?);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get(&self, path: &str) -> anyhow::Result<Value> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, path))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn health(&self) -> anyhow::Result<Value> {
        self.get("health").await
    }

    async fn info(&self) -> anyhow::Result<Value> {
        self.get("info").await
    }

    async fn list_tools(&self) -> anyhow::Result<Value> {
        self.get("tools").await
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> anyhow::Result<ToolCallResult> {
        let response = self
            .http
            .post(format!("{}/tools", self.base_url))
            .json(&json!({ "name": name, "arguments": arguments }))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn send_message(&self, method: &str, params: Value) -> anyhow::Result<McpResponse> {
        // -32603 arrives with a 500 status but still carries a JSON-RPC body
        let response = self
            .http
            .post(format!("{}/messages", self.base_url))
            .json(&McpRequest::new(method, params))
            .send()
            .await?;
        Ok(response.json().await?)
    }
}

fn parse_object(raw: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(raw).with_context(|| format!("invalid JSON: {}", raw))?;
    if !value.is_object() {
        bail!("expected a JSON object, got {}", raw);
    }
    Ok(value)
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn smoke(client: &McpClient) -> anyhow::Result<()> {
    println!("1. Health check");
    let health = client.health().await?;
    println!("   status: {}", health["status"]);
    println!("   server: {}", health["server"]);

    println!("2. Server information");
    let info = client.info().await?;
    println!("   name: {}", info["name"]);
    println!("   version: {}", info["version"]);
    println!("   protocol: {}", info["protocolVersion"]);

    println!("3. Available tools");
    let tools = client.list_tools().await?;
    let tools = tools["tools"].as_array().cloned().unwrap_or_default();
    println!("   {} tools:", tools.len());
    for tool in &tools {
        println!("   - {}: {}", tool["name"], tool["description"]);
    }

    println!("4. Tool call: echo");
    let result = client
        .call_tool("echo", json!({ "message": "Hello from MCP Client!" }))
        .await?;
    println!("   result: {}", result.first_text());

    println!("5. Tool call: get_current_time (KST)");
    let result = client
        .call_tool("get_current_time", json!({ "timezone": "KST" }))
        .await?;
    println!("   result: {}", result.first_text());

    println!("6. Tool call: calculate");
    let result = client
        .call_tool(
            "calculate",
            json!({ "a": 15, "b": 7, "operation": "multiply" }),
        )
        .await?;
    println!("   result: {}", result.first_text());

    println!("7. JSON-RPC: tools/list");
    let response = client.send_message("tools/list", json!({})).await?;
    if let Some(error) = response.error {
        bail!("tools/list failed: {} ({})", error.message, error.code);
    }
    let count = response
        .result
        .as_ref()
        .and_then(|r| r["tools"].as_array())
        .map_or(0, Vec::len);
    println!("   {} tools", count);

    println!("All checks passed");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = McpClient::new(
        &cli.base_url,
        cli.access_token.as_deref(),
        cli.function_key.as_deref(),
    )?;

    match cli.command {
        Commands::Health => print_json(&client.health().await?)?,
        Commands::Info => print_json(&client.info().await?)?,
        Commands::List => print_json(&client.list_tools().await?)?,
        Commands::Call { name, args } => {
            let result = client.call_tool(&name, parse_object(&args)?).await?;
            print_json(&result)?;
        }
        Commands::Message { method, params } => {
            let response = client.send_message(&method, parse_object(&params)?).await?;
            print_json(&response)?;
        }
        Commands::Smoke => smoke(&client).await?,
    }

    Ok(())
}
