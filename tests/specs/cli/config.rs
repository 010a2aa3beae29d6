// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend configuration and failure specs for networked commands

use crate::prelude::*;

#[test]
fn show_without_backend_is_a_config_error() {
    cli()
        .args(&["show", "881"])
        .fails()
        .code(2)
        .stderr_has("TAT_API_BASE_URL")
        .stdout_lacks("Ticket");
}

#[test]
fn non_http_backend_is_rejected() {
    cli().args(&["show", "881", "--base-url", "ftp://tickets"]).fails().code(2).stderr_has("http");
}

#[test]
fn blank_ticket_id_is_rejected() {
    cli().args(&["show", " "]).backend("http://127.0.0.1:1").fails().code(2);
}

#[test]
fn unreachable_backend_fails_the_load() {
    cli()
        .args(&["show", "881"])
        .backend("http://127.0.0.1:1")
        .env("TAT_HTTP_TIMEOUT_MS", "2000")
        .fails()
        .code(1)
        .stderr_has("failed to load ticket 881");
}

#[test]
fn task_data_without_backend_is_a_config_error() {
    cli().args(&["task-data", "881"]).fails().code(2);
}
