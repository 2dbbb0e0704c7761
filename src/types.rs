//! Core types for the toolbox

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The closed set of tools this server can execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    GetCurrentTime,
    Echo,
    Calculate,
}

impl ToolKind {
    /// All tools, in catalog order
    pub const ALL: [ToolKind; 3] = [ToolKind::GetCurrentTime, ToolKind::Echo, ToolKind::Calculate];

    /// Wire name of the tool
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::GetCurrentTime => "get_current_time",
            ToolKind::Echo => "echo",
            ToolKind::Calculate => "calculate",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Timezone accepted by `get_current_time`
///
/// KST is a fixed UTC+9 offset; no DST rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timezone {
    #[default]
    #[serde(rename = "UTC")]
    Utc,
    #[serde(rename = "KST")]
    Kst,
}

impl Timezone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timezone::Utc => "UTC",
            Timezone::Kst => "KST",
        }
    }

    /// Offset from UTC in hours
    pub fn offset_hours(&self) -> i64 {
        match self {
            Timezone::Utc => 0,
            Timezone::Kst => 9,
        }
    }
}

impl FromStr for Timezone {
    type Err = UnknownVariant;

    /// Case-sensitive: only `UTC` and `KST` are recognized
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UTC" => Ok(Timezone::Utc),
            "KST" => Ok(Timezone::Kst),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Arithmetic operation accepted by `calculate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
        }
    }
}

impl FromStr for Operation {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// A string that names no known variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown variant '{}'", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

/// Render a loose JSON value as it reads in tool output and error text:
/// strings bare, `null` as `None`, booleans as `True`/`False`, and
/// containers in literal form with quoted strings.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => render_literal(other),
    }
}

fn render_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(items) => format!(
            "[{}]",
            items.iter().map(render_literal).collect::<Vec<_>>().join(", ")
        ),
        Value::Object(map) => format!(
            "{{{}}}",
            map.iter()
                .map(|(k, v)| format!("{}: {}", quote(k), render_literal(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Single quotes unless the text holds a single quote and no double quote
fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\");
    if s.contains('\'') && !s.contains('"') {
        format!("\"{}\"", escaped)
    } else {
        format!("'{}'", escaped.replace('\'', "\\'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_kind_roundtrip() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.as_str().parse::<ToolKind>(), Ok(kind));
        }
        assert!("Echo".parse::<ToolKind>().is_err());
        assert!("".parse::<ToolKind>().is_err());
    }

    #[test]
    fn test_timezone_case_sensitive() {
        assert_eq!("KST".parse::<Timezone>(), Ok(Timezone::Kst));
        assert_eq!("UTC".parse::<Timezone>(), Ok(Timezone::Utc));
        assert!("kst".parse::<Timezone>().is_err());
        assert!("Asia/Seoul".parse::<Timezone>().is_err());
        assert_eq!(Timezone::default(), Timezone::Utc);
    }

    #[test]
    fn test_operation_parse() {
        assert_eq!("divide".parse::<Operation>(), Ok(Operation::Divide));
        assert_eq!(
            "modulo".parse::<Operation>(),
            Err(UnknownVariant("modulo".to_string()))
        );
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("plain")), "plain");
        assert_eq!(render_value(&Value::Null), "None");
        assert_eq!(render_value(&json!(true)), "True");
        assert_eq!(render_value(&json!(false)), "False");
        assert_eq!(render_value(&json!(5)), "5");
        assert_eq!(render_value(&json!(2.5)), "2.5");
        assert_eq!(render_value(&json!({"a": 1})), "{'a': 1}");
        assert_eq!(
            render_value(&json!(["x", null, [true]])),
            "['x', None, [True]]"
        );
        assert_eq!(render_value(&json!(["it's"])), "[\"it's\"]");
        assert_eq!(render_value(&json!(["a'b\""])), "['a\\'b\"']");
    }
}
