//! Property-based tests for the toolbox
//!
//! These tests verify invariants that must hold for all inputs:
//! - Dispatch never panics and always yields exactly one content block
//! - Unknown tools and methods are reported, never executed
//! - Calculator results agree with IEEE-754 arithmetic
//!
//! Run with: cargo test --test property_tests

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use proptest::prelude::*;
use serde_json::{json, Value};

use toolbox::mcp::executor::{format_number, DIVIDE_BY_ZERO};
use toolbox::mcp::{FixedClock, JsonRpcRouter, McpRequest, ServerInfo, ToolRegistry};

fn router() -> JsonRpcRouter {
    JsonRpcRouter::new(Arc::new(ToolRegistry::new()), ServerInfo::new("prop", "0"))
}

/// Parse the number after " = " in a calculate result
fn parse_result(text: &str) -> f64 {
    let (_, rhs) = text.rsplit_once(" = ").expect("result separator");
    rhs.parse().expect("numeric result")
}

fn finite() -> impl Strategy<Value = f64> {
    -1.0e12f64..1.0e12f64
}

// ============================================================================
// DISPATCH TESTS
// ============================================================================

mod dispatch_tests {
    use super::*;

    proptest! {
        /// Invariant: every name outside the catalog is an error naming the tool
        #[test]
        fn unknown_tool_is_reported(name in "\\PC{0,40}") {
            prop_assume!(!["get_current_time", "echo", "calculate"].contains(&name.as_str()));
            let result = ToolRegistry::new().execute(&name, &json!({}));
            prop_assert!(result.is_error());
            prop_assert!(result.first_text().contains(&name));
        }

        /// Invariant: content is never empty, whatever the arguments
        #[test]
        fn content_never_empty(
            tool in prop::sample::select(vec!["get_current_time", "echo", "calculate", "other"]),
            a in prop::option::of(".*"),
            op in prop::option::of("[a-z]{0,10}"),
        ) {
            let mut args = serde_json::Map::new();
            if let Some(a) = a {
                args.insert("a".to_string(), Value::String(a.clone()));
                args.insert("message".to_string(), Value::String(a.clone()));
                args.insert("timezone".to_string(), Value::String(a));
            }
            if let Some(op) = op {
                args.insert("operation".to_string(), Value::String(op));
            }
            let result = ToolRegistry::new().execute(tool, &Value::Object(args));
            prop_assert_eq!(result.content.len(), 1);
        }

        /// Invariant: echo returns the message verbatim behind the prefix
        #[test]
        fn echo_is_verbatim(message in "\\PC*") {
            let result = ToolRegistry::new().execute("echo", &json!({ "message": message }));
            prop_assert!(!result.is_error());
            prop_assert_eq!(result.first_text(), format!("Echo: {}", message));
        }
    }
}

// ============================================================================
// CALCULATOR TESTS
// ============================================================================

mod calculator_tests {
    use super::*;

    proptest! {
        /// Invariant: dividing anything by zero is the zero-division error
        #[test]
        fn divide_by_zero(a in any::<f64>()) {
            let result = ToolRegistry::new().execute(
                "calculate",
                &json!({ "a": a.to_string(), "b": 0.0, "operation": "divide" }),
            );
            prop_assert!(result.is_error());
            prop_assert_eq!(result.first_text(), DIVIDE_BY_ZERO);
        }

        /// Invariant: add/subtract/multiply agree with f64 arithmetic
        #[test]
        fn matches_float_arithmetic(a in finite(), b in finite()) {
            let registry = ToolRegistry::new();
            for (op, expected) in [("add", a + b), ("subtract", a - b), ("multiply", a * b)] {
                let result = registry.execute("calculate", &json!({ "a": a, "b": b, "operation": op }));
                prop_assert!(!result.is_error());
                prop_assert_eq!(parse_result(result.first_text()), expected);
            }
        }

        /// Invariant: (a + b) - b recovers a within tolerance
        #[test]
        fn add_then_subtract_roundtrip(a in finite(), b in finite()) {
            let registry = ToolRegistry::new();
            let sum = registry.execute("calculate", &json!({ "a": a, "b": b, "operation": "add" }));
            let sum = parse_result(sum.first_text());

            let back = registry.execute("calculate", &json!({ "a": sum, "b": b, "operation": "subtract" }));
            let back = parse_result(back.first_text());

            let tolerance = 1e-9 * a.abs().max(b.abs()).max(1.0);
            prop_assert!((back - a).abs() <= tolerance, "{} vs {}", back, a);
        }

        /// Invariant: rendered numbers parse back to the same value
        #[test]
        fn format_number_roundtrips(x in any::<f64>()) {
            prop_assume!(x.is_finite());
            let rendered = format_number(x);
            prop_assert_eq!(rendered.parse::<f64>().unwrap(), x);
        }
    }
}

// ============================================================================
// TIME TESTS
// ============================================================================

mod time_tests {
    use super::*;

    fn timestamp(text: &str) -> NaiveDateTime {
        // "현재 UTC 시간: 2024-01-01 00:00:00 UTC"
        let (_, rest) = text.split_once(": ").expect("prefix");
        let stamp = &rest[..19];
        NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M:%S").expect("timestamp")
    }

    proptest! {
        /// Invariant: KST is exactly nine hours ahead of UTC for one instant
        #[test]
        fn kst_is_utc_plus_nine(secs in 0i64..4_102_444_800) {
            let instant = DateTime::<Utc>::from_timestamp(secs, 0).unwrap();
            let registry = ToolRegistry::with_clock(Arc::new(FixedClock(instant)));

            let utc = registry.execute("get_current_time", &json!({ "timezone": "UTC" }));
            let kst = registry.execute("get_current_time", &json!({ "timezone": "KST" }));

            prop_assert!(utc.first_text().ends_with(" UTC"));
            prop_assert!(kst.first_text().ends_with(" KST"));
            prop_assert_eq!(
                timestamp(kst.first_text()) - timestamp(utc.first_text()),
                Duration::hours(9)
            );
        }

        /// Invariant: anything but the exact string "KST" reports UTC
        #[test]
        fn unknown_timezone_defaults_to_utc(tz in "\\PC{0,10}") {
            prop_assume!(tz != "KST");
            let result = ToolRegistry::new().execute("get_current_time", &json!({ "timezone": tz }));
            prop_assert!(result.first_text().starts_with("현재 UTC 시간: "));
        }
    }
}

// ============================================================================
// ROUTER TESTS
// ============================================================================

mod router_tests {
    use super::*;

    proptest! {
        /// Invariant: unknown methods are -32601 and never carry a result
        #[test]
        fn unknown_method(method in "[a-z/]{1,20}") {
            prop_assume!(!["tools/list", "tools/call", "initialize", "ping", "notifications/initialized"]
                .contains(&method.as_str()));
            let response = router().route(McpRequest::new(method.clone(), Value::Null));
            prop_assert!(response.result.is_none());
            let error = response.error.unwrap();
            prop_assert_eq!(error.code, -32601);
            prop_assert_eq!(error.message, format!("Method not found: {}", method));
        }

        /// Invariant: route never returns both result and error
        #[test]
        fn result_xor_error(method in "\\PC{0,20}", params in prop::option::of("\\PC{0,20}")) {
            let params = params.map(Value::String).unwrap_or(Value::Null);
            let response = router().route(McpRequest::new(method, params));
            prop_assert!(response.result.is_some() != response.error.is_some());
        }
    }
}
