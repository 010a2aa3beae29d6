// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tat duration` specs

use crate::prelude::*;

#[test]
fn minutes_render_days_hours_minutes() {
    cli().args(&["duration", "minutes", "1500"]).passes().stdout_eq("01:01:00\n");
}

#[test]
fn negative_minutes_render_magnitude() {
    cli().args(&["duration", "minutes", "-1500"]).passes().stdout_eq("01:01:00\n");
}

#[test]
fn seconds_render_four_fields() {
    cli().args(&["duration", "seconds", "90061"]).passes().stdout_eq("01:01:01:01\n");
}

#[test]
fn ageing_text_is_normalized() {
    cli().args(&["duration", "ageing", "52 hour 20 min"]).passes().stdout_eq("02:04:20:00\n");
}

#[test]
fn hms_actual_drops_seconds() {
    cli().args(&["duration", "hms", "26:30:15"]).passes().stdout_eq("01:02:30\n");
}

#[test]
fn malformed_hms_renders_zero() {
    cli().args(&["duration", "hms", "1:2:3:4"]).passes().stdout_eq("00:00:00\n");
}

#[test]
fn json_output_carries_input_and_result() {
    let run = cli().args(&["duration", "seconds", "61", "--format", "json"]).passes();
    assert_eq!(
        run.stdout_json(),
        json!({ "kind": "seconds", "input": "61", "formatted": "00:00:01:01" })
    );
}
