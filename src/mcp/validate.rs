//! Argument validation and normalization
//!
//! Turns a loosely-typed JSON argument bag into typed arguments for one tool.
//! The policy is deliberately lenient: unknown timezones fall back to UTC and
//! a missing `echo` message becomes the empty string. Only values that cannot
//! be coerced to a number are rejected.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::types::{render_value, Timezone, ToolKind};

/// Arguments after validation, one variant per tool
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedArgs {
    CurrentTime { timezone: Timezone },
    Echo { message: String },
    Calculate(CalculateArgs),
}

/// Operands for `calculate`
///
/// `operation` stays a raw string here; unknown operations are the
/// executor's call to reject.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculateArgs {
    pub a: f64,
    pub b: f64,
    pub operation: String,
}

/// Why an argument bag could not be normalized
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("arguments must be an object, got {0}")]
    NotAnObject(&'static str),

    #[error("could not convert {value} to a number for '{field}'")]
    NotNumeric { field: &'static str, value: String },
}

/// Validate `args` against the declared shape of `tool`
pub fn validate(tool: ToolKind, args: &Value) -> Result<NormalizedArgs, ValidationError> {
    let empty = Map::new();
    let bag = match args {
        Value::Object(map) => map,
        Value::Null => &empty,
        other => return Err(ValidationError::NotAnObject(value_type_name(other))),
    };

    let normalized = match tool {
        ToolKind::GetCurrentTime => NormalizedArgs::CurrentTime {
            timezone: bag
                .get("timezone")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
        },
        ToolKind::Echo => NormalizedArgs::Echo {
            message: match bag.get("message") {
                None | Some(Value::Null) => String::new(),
                Some(value) => render_value(value),
            },
        },
        ToolKind::Calculate => NormalizedArgs::Calculate(CalculateArgs {
            a: coerce_f64("a", bag.get("a"))?,
            b: coerce_f64("b", bag.get("b"))?,
            operation: bag
                .get("operation")
                .map(render_value)
                .unwrap_or_else(|| "add".to_string()),
        }),
    };

    Ok(normalized)
}

/// Coerce a JSON value to `f64`; an absent value is 0.0
fn coerce_f64(field: &'static str, value: Option<&Value>) -> Result<f64, ValidationError> {
    let not_numeric = |v: &Value| ValidationError::NotNumeric {
        field,
        value: v.to_string(),
    };

    let Some(v) = value else {
        return Ok(0.0);
    };

    match v {
        Value::Number(n) => n.as_f64().ok_or_else(|| not_numeric(v)),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| not_numeric(v)),
        _ => Err(not_numeric(v)),
    }
}

pub(crate) fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
