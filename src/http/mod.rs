//! HTTP transport
//!
//! Thin axum layer over the JSON-RPC router: REST tool endpoints, the
//! JSON-RPC messages endpoint, health/info, and optional function-key auth.

mod auth;
mod server;

pub use auth::FUNCTION_KEY_HEADER;
pub use server::{status_for, AppState, HttpServer, ToolCallRequest, API_PREFIX};
