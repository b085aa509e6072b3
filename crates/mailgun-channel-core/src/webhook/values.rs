/// Best-effort coercion of loosely typed webhook values.
///
/// Every helper returns `None` when the value is missing or cannot be read
/// with confidence; none of them produce a zero-value default.
use crate::models::UserVariables;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Walks nested object keys; `None` as soon as a step is not an object
pub fn value_at<'a>(element: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(element, |current, key| current.as_object()?.get(*key))
}

/// String at `path`; only JSON strings qualify
pub fn string_at(element: &Value, path: &[&str]) -> Option<String> {
    value_at(element, path)?.as_str().map(str::to_string)
}

/// Non-blank string at `path`
pub fn non_blank_string_at(element: &Value, path: &[&str]) -> Option<String> {
    string_at(element, path).filter(|s| !s.trim().is_empty())
}

/// String or number at `path`, rendered as text
pub fn text_at(element: &Value, path: &[&str]) -> Option<String> {
    match value_at(element, path)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn int_at(element: &Value, path: &[&str]) -> Option<i32> {
    match value_at(element, path)? {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => parse_int(s),
        _ => None,
    }
}

pub fn double_at(element: &Value, path: &[&str]) -> Option<f64> {
    match value_at(element, path)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_double(s),
        _ => None,
    }
}

pub fn bool_at(element: &Value, path: &[&str]) -> Option<bool> {
    match value_at(element, path)? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => parse_bool(s),
        _ => None,
    }
}

pub fn timestamp_at(element: &Value, path: &[&str]) -> Option<DateTime<Utc>> {
    from_unix_seconds(double_at(element, path)?)
}

/// Array at `path` as strings; non-string items are stringified, nulls become `""`
pub fn string_list_at(element: &Value, path: &[&str]) -> Option<Vec<String>> {
    let items: Vec<String> = value_at(element, path)?
        .as_array()?
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();

    (!items.is_empty()).then_some(items)
}

/// Object at `path` as user variables; JSON null becomes an explicit `None`
pub fn string_map_at(element: &Value, path: &[&str]) -> Option<UserVariables> {
    let object = value_at(element, path)?.as_object()?;

    let mut variables = UserVariables::new();
    for (key, value) in object {
        let value = match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };
        variables.insert(key.as_str(), value);
    }

    (!variables.is_empty()).then_some(variables)
}

pub fn parse_int(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

pub fn parse_double(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Converts Unix epoch seconds, keeping the fraction as sub-second precision.
///
/// Non-positive and non-finite values are treated as absent.
pub fn from_unix_seconds(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }

    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1_000_000_000.0).round().min(999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}
