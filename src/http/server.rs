//! HTTP server exposing the MCP REST and JSON-RPC surfaces

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Request, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use super::auth::require_function_key;
use crate::config::ServerConfig;
use crate::error::{codes, Result, ToolboxError};
use crate::mcp::{JsonRpcRouter, McpRequest, McpResponse};
use crate::types::render_value;

/// Mount point for every MCP route
pub const API_PREFIX: &str = "/api/mcp";

/// State shared by all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub router: Arc<JsonRpcRouter>,
    pub config: Arc<ServerConfig>,
}

/// Body of a REST tool call
///
/// `name` is kept loose: a missing or non-string name is executed as an
/// unknown tool rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCallRequest {
    /// Tool name as looked up in the registry
    pub fn tool_name(&self) -> String {
        render_value(&self.name)
    }
}

/// HTTP server
pub struct HttpServer {
    state: AppState,
    addr: SocketAddr,
}

impl HttpServer {
    /// Create a new HTTP server bound to the configured address
    pub fn new(router: Arc<JsonRpcRouter>, config: Arc<ServerConfig>) -> Result<Self> {
        let addr = config.bind_addr()?;
        Ok(Self {
            state: AppState { router, config },
            addr,
        })
    }

    /// Build the router
    pub fn router(state: AppState) -> Router {
        let cors = state.config.cors;

        let api = Router::new()
            .route("/health", get(health_handler))
            .route("/info", get(info_handler))
            .route("/tools", get(list_tools_handler).post(call_tool_handler))
            .route("/messages", post(messages_handler))
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_function_key,
            ));

        let app = Router::new()
            .nest(API_PREFIX, api)
            .with_state(state)
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = %Uuid::new_v4(),
                    )
                }),
            );

        if cors {
            app.layer(CorsLayer::permissive())
        } else {
            app
        }
    }

    /// Start the server
    pub async fn start(self) -> std::io::Result<()> {
        let app = Self::router(self.state);

        tracing::info!("MCP HTTP server listening on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Health check endpoint
async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    tracing::info!("Health check requested");

    let info = state.router.server_info();
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        "server": info.name,
        "version": info.version,
    }))
}

/// Server metadata and capabilities
async fn info_handler(State(state): State<AppState>) -> impl IntoResponse {
    tracing::info!("Server info requested");
    Json(state.router.server_info().clone())
}

/// Tool catalog
async fn list_tools_handler(State(state): State<AppState>) -> Json<Value> {
    tracing::info!("Listing tools");
    Json(json!({ "tools": state.router.registry().list_tools() }))
}

/// Execute a tool. Domain errors are still 200; only an unreadable body is 400.
async fn call_tool_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request: ToolCallRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Invalid request body: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid JSON in request body",
                    "message": e.to_string(),
                })),
            )
                .into_response();
        }
    };

    let name = request.tool_name();
    tracing::info!(tool = %name, arguments = %request.arguments, "Executing tool");

    let result = state.router.registry().execute(&name, &request.arguments);
    (StatusCode::OK, Json(result)).into_response()
}

/// JSON-RPC envelope endpoint
async fn messages_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let response = match serde_json::from_slice::<McpRequest>(&body) {
        Ok(request) => state.router.route(request),
        Err(e) => {
            tracing::error!("Messages endpoint error: {}", e);
            McpResponse::from_error(None, ToolboxError::Internal(e.to_string()))
        }
    };

    (status_for(&response), Json(response)).into_response()
}

/// Internal errors surface as 500; everything else, including protocol
/// errors, is a 200 carrying the JSON-RPC error object.
pub fn status_for(response: &McpResponse) -> StatusCode {
    match response.error_code() {
        Some(codes::INTERNAL_ERROR) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    }
}
