//! Tool registry and dispatch
//!
//! The registry is built once at startup and only read afterwards, so it can
//! be shared behind an `Arc` by any number of concurrent requests.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::executor::{self, Clock, SystemClock};
use super::protocol::{ToolCallResult, ToolDefinition};
use super::tools::TOOL_DEFINITIONS;
use super::validate::validate;
use crate::types::ToolKind;

/// Immutable association from tool name to descriptor and executor
pub struct ToolRegistry {
    definitions: Vec<ToolDefinition>,
    bindings: HashMap<String, ToolKind>,
    clock: Arc<dyn Clock>,
}

impl ToolRegistry {
    /// Registry backed by the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Registry reading time from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        let definitions = super::tools::get_tool_definitions();
        let bindings = TOOL_DEFINITIONS
            .iter()
            .map(|(kind, _, _)| (kind.as_str().to_string(), *kind))
            .collect();

        Self {
            definitions,
            bindings,
            clock,
        }
    }

    /// Tool descriptors in catalog order
    pub fn list_tools(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Find the executor bound to `name`
    pub fn resolve(&self, name: &str) -> Option<ToolKind> {
        self.bindings.get(name).copied()
    }

    /// Execute a tool by name. Never fails: unknown tools, bad arguments and
    /// domain errors all come back as results with `isError` set.
    pub fn execute(&self, name: &str, arguments: &Value) -> ToolCallResult {
        let Some(kind) = self.resolve(name) else {
            tracing::warn!(tool = name, "Unknown tool requested");
            return ToolCallResult::error(format!("오류: 알 수 없는 도구 '{}'", name));
        };

        let result = match validate(kind, arguments) {
            Ok(args) => executor::execute(&args, self.clock.now()),
            Err(e) => {
                tracing::error!(tool = name, "Tool execution error: {}", e);
                executor::execution_error(e)
            }
        };

        if result.is_error() {
            tracing::warn!(tool = name, "Tool returned error: {}", result.first_text());
        } else {
            tracing::debug!(tool = name, "Tool executed");
        }

        result
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.bindings.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::executor::{FixedClock, DIVIDE_BY_ZERO};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn fixed_registry() -> ToolRegistry {
        let instant = Utc.with_ymd_and_hms(2024, 12, 31, 18, 0, 0).unwrap();
        ToolRegistry::with_clock(Arc::new(FixedClock(instant)))
    }

    #[test]
    fn test_list_tools() {
        let registry = ToolRegistry::new();
        let names: Vec<_> = registry.list_tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["get_current_time", "echo", "calculate"]);
    }

    #[test]
    fn test_every_listed_tool_resolves() {
        let registry = ToolRegistry::new();
        for def in registry.list_tools() {
            assert!(registry.resolve(&def.name).is_some(), "{}", def.name);
        }
    }

    #[test]
    fn test_unknown_tool() {
        let result = ToolRegistry::new().execute("rm_rf", &json!({}));
        assert!(result.is_error());
        assert_eq!(result.first_text(), "오류: 알 수 없는 도구 'rm_rf'");
    }

    #[test]
    fn test_unknown_tool_ignores_bad_arguments() {
        let result = ToolRegistry::new().execute("nope", &json!([1, 2]));
        assert_eq!(result.first_text(), "오류: 알 수 없는 도구 'nope'");
    }

    #[test]
    fn test_echo() {
        let result = ToolRegistry::new().execute("echo", &json!({"message": "X"}));
        assert!(!result.is_error());
        assert_eq!(result.first_text(), "Echo: X");
    }

    #[test]
    fn test_time_crosses_midnight_in_kst() {
        let registry = fixed_registry();
        let utc = registry.execute("get_current_time", &json!({}));
        let kst = registry.execute("get_current_time", &json!({"timezone": "KST"}));
        assert_eq!(utc.first_text(), "현재 UTC 시간: 2024-12-31 18:00:00 UTC");
        assert_eq!(kst.first_text(), "현재 KST 시간: 2025-01-01 03:00:00 KST");
    }

    #[test]
    fn test_calculate_paths() {
        let registry = ToolRegistry::new();

        let ok = registry.execute("calculate", &json!({"a": 15, "b": 7, "operation": "multiply"}));
        assert_eq!(ok.first_text(), "15.0 multiply 7.0 = 105.0");

        let zero = registry.execute("calculate", &json!({"a": 1, "b": 0, "operation": "divide"}));
        assert!(zero.is_error());
        assert_eq!(zero.first_text(), DIVIDE_BY_ZERO);

        let defaults = registry.execute("calculate", &json!({}));
        assert_eq!(defaults.first_text(), "0.0 add 0.0 = 0.0");
    }

    #[test]
    fn test_validation_fault_becomes_result() {
        let result = ToolRegistry::new().execute("calculate", &json!({"a": "ten", "b": 1}));
        assert!(result.is_error());
        assert!(result.first_text().starts_with("도구 실행 오류: "));
        assert!(result.first_text().contains("\"ten\""));

        let result = ToolRegistry::new().execute("echo", &json!("hi"));
        assert!(result.is_error());
        assert!(result.first_text().starts_with("도구 실행 오류: "));
    }
}
