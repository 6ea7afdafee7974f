//! Lenient accessors for provider JSON payloads.
//!
//! Providers disagree on whether a missing value is `null`, absent, an
//! empty string or a number encoded as a string. These helpers fold all
//! of that into `Option`.

use serde_json::Value;

/// Numeric field, accepting numbers and numeric strings.
pub fn number(value: &Value, key: &str) -> Option<f64> {
    as_number(value.get(key)?)
}

/// Numeric element of a JSON array.
pub fn number_at(value: &Value, index: usize) -> Option<f64> {
    as_number(value.get(index)?)
}

/// Non-blank string field, trimmed.
pub fn text(value: &Value, key: &str) -> Option<String> {
    as_text(value.get(key)?)
}

/// Non-blank string element of a JSON array, trimmed.
pub fn text_at(value: &Value, index: usize) -> Option<String> {
    as_text(value.get(index)?)
}

/// Integer field, accepting numbers and numeric strings.
pub fn integer(value: &Value, key: &str) -> Option<i64> {
    number(value, key).map(|n| n as i64)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .filter(|n: &f64| n.is_finite())
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
    .filter(|s| !s.is_empty())
}
