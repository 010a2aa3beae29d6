// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn tat_no_args_shows_usage_and_exits_zero() {
    cli().passes().stdout_has("Usage:");
}

#[test]
fn tat_help_lists_commands() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("show")
        .stdout_has("watch")
        .stdout_has("task-data")
        .stdout_has("duration")
        .stdout_has("locate");
}

#[test]
fn tat_show_help_shows_usage() {
    cli().args(&["show", "--help"]).passes().stdout_has("Usage:").stdout_has("--base-url");
}

#[test]
fn tat_duration_help_shows_subcommands() {
    cli()
        .args(&["duration", "--help"])
        .passes()
        .stdout_has("minutes")
        .stdout_has("seconds")
        .stdout_has("ageing")
        .stdout_has("hms");
}

#[test]
fn tat_locate_help_shows_flags() {
    cli().args(&["locate", "--help"]).passes().stdout_has("--step").stdout_has("--elapsed");
}

#[test]
fn tat_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn unknown_command_is_a_usage_error() {
    cli().args(&["frobnicate"]).fails().code(2).stderr_has("frobnicate");
}
