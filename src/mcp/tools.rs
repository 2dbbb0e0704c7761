//! MCP tool definitions for the toolbox

use once_cell::sync::Lazy;
use serde_json::json;

use super::protocol::ToolDefinition;
use crate::types::ToolKind;

/// All tool definitions, in catalog order
pub const TOOL_DEFINITIONS: &[(ToolKind, &str, &str)] = &[
    (
        ToolKind::GetCurrentTime,
        "현재 서버 시간을 UTC 및 KST로 반환합니다",
        r#"{
            "type": "object",
            "properties": {
                "timezone": {"type": "string", "description": "타임존 (UTC 또는 KST)", "enum": ["UTC", "KST"]}
            }
        }"#,
    ),
    (
        ToolKind::Echo,
        "입력받은 메시지를 그대로 반환합니다 (테스트용)",
        r#"{
            "type": "object",
            "properties": {
                "message": {"type": "string", "description": "반환할 메시지"}
            },
            "required": ["message"]
        }"#,
    ),
    (
        ToolKind::Calculate,
        "두 숫자의 사칙연산을 수행합니다",
        r#"{
            "type": "object",
            "properties": {
                "a": {"type": "number", "description": "첫 번째 숫자"},
                "b": {"type": "number", "description": "두 번째 숫자"},
                "operation": {"type": "string", "description": "연산 종류", "enum": ["add", "subtract", "multiply", "divide"]}
            },
            "required": ["a", "b", "operation"]
        }"#,
    ),
];

static PARSED_DEFINITIONS: Lazy<Vec<ToolDefinition>> = Lazy::new(|| {
    TOOL_DEFINITIONS
        .iter()
        .map(|(kind, description, schema)| ToolDefinition {
            name: kind.as_str().to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
});

/// Get all tool definitions as ToolDefinition structs
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    PARSED_DEFINITIONS.clone()
}

/// Borrow the cached definitions without cloning
pub fn tool_definitions() -> &'static [ToolDefinition] {
    &PARSED_DEFINITIONS
}
