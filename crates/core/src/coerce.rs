// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lenient deserializers for loosely-typed backend payloads.
//!
//! The ticket backend sends numbers as strings, strings as numbers, and nulls
//! where fields are absent. These helpers coerce at the serde boundary so the
//! domain types stay strictly typed; anything unrecognizable becomes `None`
//! (or empty) rather than a decode failure.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const NAIVE_FORMATS: &[&str] =
    &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an absolute timestamp into epoch milliseconds.
///
/// Accepts RFC 3339 (any offset) and offset-less `YYYY-MM-DD HH:MM:SS`
/// forms, the latter taken as UTC. Pre-epoch instants are rejected.
pub fn parse_timestamp_ms(text: &str) -> Option<u64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let millis = match DateTime::parse_from_rfc3339(text) {
        Ok(dt) => dt.timestamp_millis(),
        Err(_) => NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())?
            .and_utc()
            .timestamp_millis(),
    };
    u64::try_from(millis).ok()
}

pub(crate) fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

fn value_as_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Number, numeric string, or null → `Option<i64>`.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_i64))
}

/// Timestamp string (or epoch-ms number) → `Option<u64>` epoch milliseconds.
pub fn lenient_timestamp_ms<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => parse_timestamp_ms(&s),
        Some(Value::Number(n)) => n.as_u64(),
        _ => None,
    })
}

/// String or scalar → `Option<String>`; blank strings become `None`.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(value_as_string).filter(|s| !s.trim().is_empty()))
}

/// `true`/`false`, `1`/`0`, or their string forms → `bool`; anything else is false.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1"),
        _ => false,
    })
}

/// Array of scalars, a single scalar, or null → `Vec<String>`.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.into_iter().filter_map(value_as_string).collect(),
        Some(other) => value_as_string(other).into_iter().collect(),
        None => Vec::new(),
    })
}

#[cfg(test)]
#[path = "coerce_tests.rs"]
mod tests;
