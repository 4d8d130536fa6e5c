//! Forgiving deserializers for persisted records.
//!
//! Stored trips come from older clients that wrote numbers as strings,
//! zeroes, negatives or nothing at all. Counts fall back to 1 and flags to
//! `false` instead of failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) fn one() -> u32 {
    1
}

pub(crate) fn positive_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(count_from_value).unwrap_or(1))
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(flag_from_value).unwrap_or(false))
}

/// Deserializes a string enum through `parse`, using the default for
/// unknown or missing values.
pub(crate) fn enum_or_default<'de, D, T>(
    deserializer: D,
    parse: fn(&str) -> Option<T>,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_str).and_then(parse).unwrap_or_default())
}

fn count_from_value(value: &Value) -> u32 {
    let raw = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match raw {
        Some(raw) if raw.is_finite() && raw >= 1.0 => raw.ceil().min(f64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

fn flag_from_value(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => matches!(text.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    }
}
