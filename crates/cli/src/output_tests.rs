// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tat_core::test_support::{sequence_secs, summary_due_at};
use tat_core::{FakeClock, LadderResponse, Ticket};
use tat_engine::{EscalationTimer, TimerSnapshot};

const NOW: u64 = FakeClock::START_MS;

fn view(ticket: Ticket) -> TimerView {
    let mut timer = EscalationTimer::default();
    let snapshot =
        TimerSnapshot::new(1, ticket, sequence_secs(&[300, 180]), LadderResponse::Absent);
    timer.load(&snapshot, NOW);
    timer.view().unwrap()
}

fn aged(age_secs: u64) -> tat_core::TicketBuilder {
    Ticket::builder().id("881").created_at_ms(NOW - age_secs * 1000).resolution_tat(90)
}

#[test]
fn track_line_shows_rung_target_and_users() {
    let view = view(aged(250).build());
    assert_eq!(
        format_track_line(&view.response, false),
        "response   L1 E1 target 00:00:05  left 00:00:00:50  -> user-1"
    );
}

#[test]
fn track_line_marks_overrun_and_pause() {
    let view = view(aged(500).build());
    assert_eq!(
        format_track_line(&view.response, true),
        "response   L2 E2 target 00:00:03  over 00:00:00:20 (paused)  -> user-2"
    );
}

#[test]
fn ladderless_track_line_is_minimal() {
    let view = view(aged(0).build());
    assert_eq!(
        format_track_line(&view.resolution, false),
        "resolution target 00:01:30  left 00:00:00:00"
    );
}

#[test]
fn title_includes_number_and_heading() {
    let view = view(aged(0).ticket_number("TKT-881").heading("Leaking tap").build());
    assert_eq!(format_title(&view), "Ticket 881 (TKT-881) Leaking tap");
}

#[test]
fn body_lists_status_ageing_and_tracks() {
    let ticket = aged(250).issue_status("On Hold").ageing("4").response_time("00:03:59").build();
    let view = view(ticket);
    let body = format_view_body(&view);

    assert_eq!(body[0], "status     On Hold");
    assert_eq!(body[1], "ageing     00:00:04:10  server 00:00:04:00");
    assert!(body[2].starts_with("response") && body[2].contains("(paused)"));
    assert!(body[3].starts_with("resolution"));
    assert_eq!(body.last().map(String::as_str), Some("actual     response 00:00:03"));
}

#[test]
fn closed_ticket_ageing_is_marked_stopped() {
    let view = view(aged(60).issue_status("Closed").build());
    assert_eq!(format_view_body(&view)[1], "ageing     00:00:01:00 (stopped)");
}

#[test]
fn frame_includes_golden_track_when_present() {
    let ticket = aged(10)
        .is_golden_ticket(true)
        .next_executive_escalation(summary_due_at("CEO", NOW + 60_000))
        .build();
    assert_eq!(
        format_frame(&view(ticket)),
        "ageing 00:00:00:10 | response left 00:00:04:50 | resolution left 00:00:00:00 \
         | golden left 00:00:01:00"
    );
}

#[test]
fn frame_reports_hold() {
    let frame = format_frame(&view(aged(10).issue_status("on hold").build()));
    assert!(frame.ends_with(" | on hold"));
}

#[test]
fn json_output_succeeds() {
    let view = view(aged(10).build());
    assert!(format_or_json(OutputFormat::Json, &view, || {}).is_ok());
}

#[test]
fn overdue_detected_on_any_track() {
    assert!(!any_overdue(&view(aged(250).build())));
    assert!(any_overdue(&view(aged(500).build())));
}
