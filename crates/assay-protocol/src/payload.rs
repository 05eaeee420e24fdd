//! Field extraction from loosely typed JSON payloads.
//!
//! Browser forms send numbers as strings and pad text with whitespace, so
//! these helpers normalise both before anything reaches the engine.

use crate::error::ProtocolError;
use serde_json::{Map, Value};

pub type Payload = Map<String, Value>;

pub fn as_object(value: &Value) -> Result<&Payload, ProtocolError> {
    value
        .as_object()
        .ok_or_else(|| ProtocolError::invalid("Request body must be a JSON object"))
}

pub fn list_of_strings(payload: &Payload, key: &str) -> Result<Vec<String>, ProtocolError> {
    let items = non_empty_list(payload, key)?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .ok_or_else(|| {
                    ProtocolError::invalid(format!(
                        "Every entry in '{key}' must be a non-empty string"
                    ))
                })
        })
        .collect()
}

pub fn list_of_numbers(payload: &Payload, key: &str) -> Result<Vec<f64>, ProtocolError> {
    let items = non_empty_list(payload, key)?;
    items
        .iter()
        .map(|item| {
            number_from(item).ok_or_else(|| {
                ProtocolError::invalid(format!("All entries in '{key}' must be numeric"))
            })
        })
        .collect()
}

fn non_empty_list<'a>(payload: &'a Payload, key: &str) -> Result<&'a Vec<Value>, ProtocolError> {
    payload
        .get(key)
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| ProtocolError::invalid(format!("'{key}' must be a non-empty list")))
}

/// A JSON number, or a string holding one.
pub fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

pub fn required_number(payload: &Payload, key: &str) -> Result<f64, ProtocolError> {
    payload
        .get(key)
        .and_then(number_from)
        .ok_or_else(|| ProtocolError::invalid(format!("'{key}' must be a positive number")))
}

pub fn optional_number(payload: &Payload, key: &str) -> Result<Option<f64>, ProtocolError> {
    match payload.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => number_from(value)
            .map(Some)
            .ok_or_else(|| ProtocolError::invalid(format!("'{key}' must be numeric"))),
    }
}

/// Whole numbers only; `4.0` is accepted, `4.5` is not.
pub fn optional_integer(payload: &Payload, key: &str) -> Result<Option<i64>, ProtocolError> {
    match optional_number(payload, key)? {
        None => Ok(None),
        Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(Some(v as i64)),
        Some(_) => Err(ProtocolError::invalid(format!("'{key}' must be a whole number"))),
    }
}

/// Counts are truncated toward zero and must stay positive.
pub fn positive_count(payload: &Payload, key: &str) -> Result<u32, ProtocolError> {
    let value = payload
        .get(key)
        .filter(|v| v.is_number())
        .and_then(Value::as_f64)
        .ok_or_else(|| ProtocolError::invalid(format!("'{key}' must be a positive number")))?;
    let count = value.trunc();
    if count < 1.0 || count > u32::MAX as f64 {
        return Err(ProtocolError::invalid(format!("'{key}' must be a positive number")));
    }
    Ok(count as u32)
}

pub fn optional_bool(payload: &Payload, key: &str, default: bool) -> Result<bool, ProtocolError> {
    match payload.get(key) {
        None | Some(Value::Null) => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ProtocolError::invalid(format!("'{key}' must be true or false"))),
    }
}

pub fn optional_string<'a>(
    payload: &'a Payload,
    key: &str,
) -> Result<Option<&'a str>, ProtocolError> {
    match payload.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim())),
        Some(_) => Err(ProtocolError::invalid(format!("'{key}' must be a string"))),
    }
}
