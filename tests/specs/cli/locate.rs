// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tat locate` specs

use crate::prelude::*;

#[test]
fn elapsed_inside_first_rung() {
    cli()
        .args(&["locate", "--step", "300", "--step", "180", "--elapsed", "250"])
        .passes()
        .stdout_eq("rung 1 of 2  left 00:00:00:50 (50s)\n");
}

#[test]
fn boundary_belongs_to_next_rung() {
    cli()
        .args(&["locate", "--step", "300", "--step", "180", "--elapsed", "300"])
        .passes()
        .stdout_has("rung 2 of 2  left 00:00:03:00");
}

#[test]
fn past_the_ladder_reports_overrun() {
    cli()
        .args(&["locate", "--step", "300", "--step", "180", "--elapsed", "500"])
        .passes()
        .stdout_has("over 00:00:00:20 (-20s)");
}

#[test]
fn no_steps_is_no_ladder() {
    cli().args(&["locate", "--elapsed", "10"]).passes().stdout_eq("no ladder\n");
}

#[test]
fn json_output() {
    let run = cli()
        .args(&["locate", "--step", "60", "--step", "0", "--step", "60", "--elapsed", "60", "-f", "json"])
        .passes();
    let json = run.stdout_json();
    assert_eq!(json["rungs"], 3);
    assert_eq!(json["level"], 3);
    assert_eq!(json["remaining_secs"], 60);
    assert_eq!(json["overdue"], false);
}

#[test]
fn elapsed_is_required() {
    cli().args(&["locate", "--step", "60"]).fails().code(2).stderr_has("--elapsed");
}
