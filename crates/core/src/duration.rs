// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Duration parsing and fixed-width display formatting.
//!
//! Every function here is total: missing or malformed input renders as the
//! zero duration, never an error, since the output goes straight into labels.
//!
//! Two display widths exist:
//! - `DD:HH:MM` for minute-granularity sources (server TAT targets)
//! - `DD:HH:MM:SS` for live countdowns and ageing

use regex::Regex;
use std::sync::LazyLock;

pub const ZERO_MINUTES: &str = "00:00:00";
pub const ZERO_SECONDS: &str = "00:00:00:00";

const MINUTES_PER_DAY: i64 = 24 * 60;
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[allow(clippy::expect_used)]
static HOURS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*hour").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static MINUTES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*min").expect("constant regex pattern is valid"));

/// Format a minute count as `DD:HH:MM`.
///
/// `None` and zero render as `00:00:00`. Negative values are rendered by
/// magnitude.
pub fn format_minutes(minutes: Option<i64>) -> String {
    let minutes = match minutes {
        None | Some(0) => return ZERO_MINUTES.to_string(),
        Some(m) => magnitude(m),
    };
    let days = minutes / MINUTES_PER_DAY;
    let hours = (minutes % MINUTES_PER_DAY) / 60;
    let mins = minutes % 60;
    format!("{:02}:{:02}:{:02}", days, hours, mins)
}

/// Format a second count as `DD:HH:MM:SS`.
///
/// Non-positive input renders as all zeros; callers showing an overrun pass
/// the magnitude and carry the sign separately.
pub fn format_seconds(seconds: i64) -> String {
    if seconds <= 0 {
        return ZERO_SECONDS.to_string();
    }
    let days = seconds / SECONDS_PER_DAY;
    let hours = (seconds % SECONDS_PER_DAY) / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}:{:02}", days, hours, mins, secs)
}

/// Parse a backend ageing string into `DD:HH:MM:00`.
///
/// Accepts phrases such as `"52 hour 20 min"` (either part optional,
/// case-insensitive) or a bare integer minute count such as `"3140"`.
pub fn parse_free_text_ageing(text: &str) -> String {
    match free_text_minutes(text) {
        Some(minutes) => format_seconds(minutes.min(i64::MAX / 60) * 60),
        None => ZERO_SECONDS.to_string(),
    }
}

fn free_text_minutes(text: &str) -> Option<i64> {
    let hours = capture_number(&HOURS_PATTERN, text);
    let minutes = capture_number(&MINUTES_PATTERN, text);
    if hours.is_some() || minutes.is_some() {
        let total = hours.unwrap_or(0).saturating_mul(60).saturating_add(minutes.unwrap_or(0));
        return Some(total);
    }
    text.trim().parse::<i64>().ok().map(magnitude)
}

fn capture_number(pattern: &Regex, text: &str) -> Option<i64> {
    let digits = pattern.captures(text)?.get(1)?.as_str();
    // Absurdly long digit runs saturate rather than vanish
    Some(digits.parse::<i64>().unwrap_or(i64::MAX / 60))
}

/// Parse an `HH:MM:SS` (or `HH:MM`) actual into `DD:HH:MM`.
///
/// Seconds are discarded.
pub fn parse_hhmmss(text: &str) -> String {
    let fields: Vec<&str> = text.trim().split(':').map(str::trim).collect();
    if !(2..=3).contains(&fields.len()) {
        return ZERO_MINUTES.to_string();
    }
    let parsed: Option<Vec<i64>> =
        fields.iter().map(|f| f.parse::<u32>().ok().map(i64::from)).collect();
    match parsed.as_deref() {
        Some([hours, minutes, ..]) => format_minutes(Some(hours * 60 + minutes)),
        _ => ZERO_MINUTES.to_string(),
    }
}

fn magnitude(value: i64) -> i64 {
    i64::try_from(value.unsigned_abs()).unwrap_or(i64::MAX)
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
