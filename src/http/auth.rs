//! Function-key authentication
//!
//! When a key is configured, callers must present it either in the
//! `x-functions-key` header or as the `code` query parameter.

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use super::server::AppState;

/// Header carrying the function key
pub const FUNCTION_KEY_HEADER: &str = "x-functions-key";

#[derive(Debug, Deserialize)]
struct KeyQuery {
    code: Option<String>,
}

/// Reject requests that do not carry the configured function key
pub async fn require_function_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.config.function_key.as_deref() else {
        return next.run(request).await;
    };

    if presented_key(&request).as_deref() == Some(expected) {
        next.run(request).await
    } else {
        tracing::warn!(uri = %request.uri(), "Rejected request without valid function key");
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response()
    }
}

fn presented_key(request: &Request) -> Option<String> {
    let header = request
        .headers()
        .get(FUNCTION_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    header.or_else(|| {
        Query::<KeyQuery>::try_from_uri(request.uri())
            .ok()
            .and_then(|Query(q)| q.code)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request(uri: &str, header: Option<&str>) -> Request {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(key) = header {
            builder = builder.header(FUNCTION_KEY_HEADER, key);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_presented_key_header() {
        assert_eq!(
            presented_key(&request("/api/mcp/tools", Some("k1"))),
            Some("k1".to_string())
        );
    }

    #[test]
    fn test_presented_key_query_is_decoded() {
        assert_eq!(
            presented_key(&request("/api/mcp/tools?code=ab%2Fc%3D%3D", None)),
            Some("ab/c==".to_string())
        );
    }

    #[test]
    fn test_header_wins_over_query() {
        assert_eq!(
            presented_key(&request("/api/mcp/tools?code=q", Some("h"))),
            Some("h".to_string())
        );
        assert_eq!(presented_key(&request("/api/mcp/tools", None)), None);
    }
}
