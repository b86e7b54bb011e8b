//! Helpers for inspecting loosely-typed JSON values.

use serde_json::Value;

/// Name of the JSON type of `value`, used in error messages
pub(crate) const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Coerce a JSON value to an integer
///
/// Integers pass through, floats are truncated toward zero, strings are
/// trimmed and parsed as base-10, booleans count as 0 and 1. The error
/// string is the underlying conversion failure.
pub(crate) fn to_integer(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.is_u64() {
                return Err(format!("integer {n} out of range"));
            }
            let f = n.as_f64().unwrap_or(f64::NAN);
            let t = f.trunc();
            if !(f.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64) {
                return Err(format!("cannot convert float {n} to integer"));
            }
            Ok(t as i64)
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| format!("{e}: {s:?}")),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => {
            Err(format!("integer expected but found {}", type_name(value)))
        }
    }
}

/// Truthiness of a response flag such as `ok`
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}

/// Render a field as display text; strings lose their quotes
pub(crate) fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
