// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tat show` and `tat task-data` against a mock backend

use chrono::{Duration, Utc};

use crate::prelude::backend::Backend;
use crate::prelude::*;

fn created_secs_ago(secs: i64) -> String {
    (Utc::now() - Duration::seconds(secs)).to_rfc3339()
}

async fn ticket_backend(status: &str, age_secs: i64) -> Backend {
    let backend = Backend::start().await;
    backend
        .ticket(
            "881",
            json!({
                "complaint": {
                    "id": 881,
                    "ticket_number": "TKT-881",
                    "heading": "Leaking tap",
                    "issue_status": status,
                    "created_at": created_secs_ago(age_secs),
                    "response_tat": 45,
                    "resolution_tat": 1500
                }
            }),
        )
        .await
        .timings(
            "response_tat_timings",
            "881",
            json!([
                { "escalation_name": "E1", "minutes": 5, "users": ["amy"] },
                { "escalation_name": "E2", "minutes": 3, "users": ["raj"] }
            ]),
        )
        .await
        .timings("resolution_tat_timings", "881", json!({ "escalation_name": "R1", "minutes": 90 }))
        .await;
    backend
}

#[tokio::test(flavor = "multi_thread")]
async fn show_prints_live_rung_and_assignees() {
    let backend = ticket_backend("Open", 250).await;

    cli()
        .args(&["show", "881"])
        .backend(&backend.uri())
        .passes()
        .stdout_has("Ticket 881 (TKT-881) Leaking tap")
        .stdout_has("status     Open")
        .stdout_has("response   L1 E1 target 00:00:05")
        .stdout_has("-> amy")
        .stdout_has("resolution R1 target 01:30");
}

#[tokio::test(flavor = "multi_thread")]
async fn show_json_reports_tracks() {
    let backend = ticket_backend("Open", 400).await;

    let run = cli().args(&["show", "881", "-f", "json"]).backend(&backend.uri()).passes();
    let view = run.stdout_json();

    assert_eq!(view["ticket_id"], "881");
    assert_eq!(view["response"]["level"], 2);
    assert_eq!(view["response"]["escalation_name"], "E2");
    let remaining = view["response"]["remaining_secs"].as_i64().unwrap();
    assert!((70..=80).contains(&remaining), "remaining {remaining}");
    assert!(view.get("golden").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn on_hold_ticket_shows_static_targets() {
    let backend = ticket_backend("On Hold", 250).await;

    let run = cli().args(&["show", "881", "-f", "json"]).backend(&backend.uri()).passes();
    let view = run.stdout_json();

    assert_eq!(view["is_on_hold"], true);
    assert_eq!(view["response"]["target"], "00:00:45");
    assert_eq!(view["resolution"]["target"], "01:01:00");
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_ticket_exits_not_found() {
    let backend = Backend::start().await;

    cli()
        .args(&["show", "404"])
        .backend(&backend.uri())
        .fails()
        .code(3)
        .stderr_has("ticket not found: 404");
}

#[tokio::test(flavor = "multi_thread")]
async fn task_data_prints_backend_payload() {
    let backend = Backend::start().await;
    backend.task_data("881", json!({ "assignees": ["amy"], "priority": "P1" })).await;

    let run = cli().args(&["task-data", "881"]).backend(&backend.uri()).passes();

    assert_eq!(run.stdout_json(), json!({ "assignees": ["amy"], "priority": "P1" }));
}
