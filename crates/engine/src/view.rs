// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only display projection of an [`EscalationTimer`].

use serde::Serialize;
use tat_core::{format_minutes, format_seconds, parse_free_text_ageing, parse_hhmmss, TicketId};

use crate::timer::{EscalationTimer, TimerSnapshot};
use crate::track::Track;

/// Everything a ticket page shows about escalation timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerView {
    pub ticket_id: TicketId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub status: String,
    pub generation: u64,
    pub is_closed: bool,
    pub is_on_hold: bool,
    /// Live ageing, `DD:HH:MM:SS`
    pub ageing: String,
    /// Ageing as rendered by the backend, normalized to `DD:HH:MM:SS`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_ageing: Option<String>,
    pub response: TrackView,
    pub resolution: TrackView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub golden: Option<TrackView>,
}

/// Display state of one track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackView {
    pub track: Track,
    /// 1-based rung number; absent without a ladder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_name: Option<String>,
    pub users: Vec<String>,
    /// Target duration, `DD:HH:MM`
    pub target: String,
    /// Magnitude of the remaining time, `DD:HH:MM:SS`
    pub countdown: String,
    /// The countdown shows an overrun rather than time left
    pub overdue: bool,
    pub remaining_secs: i64,
    /// Actual response/resolution time, `DD:HH:MM`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
}

impl EscalationTimer {
    /// Project the current state for display. `None` until loaded.
    pub fn view(&self) -> Option<TimerView> {
        let snapshot = self.snapshot()?;
        let ticket = &snapshot.ticket;
        let lifecycle = ticket.lifecycle();

        let golden = ticket.has_golden_track().then(|| self.golden_view(snapshot));

        Some(TimerView {
            ticket_id: ticket.id.clone(),
            ticket_number: ticket.ticket_number.clone(),
            heading: ticket.heading.clone(),
            status: ticket.status().to_string(),
            generation: snapshot.generation,
            is_closed: lifecycle.is_closed,
            is_on_hold: lifecycle.is_on_hold,
            ageing: format_seconds(self.ageing_secs()),
            server_ageing: ticket.ageing.as_deref().map(parse_free_text_ageing),
            response: self.ladder_view(snapshot, Track::Response),
            resolution: self.ladder_view(snapshot, Track::Resolution),
            golden,
        })
    }

    fn ladder_view(&self, snapshot: &TimerSnapshot, track: Track) -> TrackView {
        let ticket = &snapshot.ticket;
        let position = self.position(track);
        let (static_target, actual) = match track {
            Track::Response => (ticket.response_tat, ticket.response_time.as_deref()),
            _ => (ticket.resolution_tat, ticket.resolution_time.as_deref()),
        };

        let step = snapshot
            .ladder_response(track)
            .and_then(|r| r.ladder())
            .zip(position.active)
            .and_then(|(ladder, index)| ladder.step(index));
        let summary = snapshot.fallback_summary(track);

        let (escalation_name, users) = match (step, summary) {
            (Some(step), _) => (step.escalation_name.clone(), step.escalate_to_users.clone()),
            (None, Some(summary)) => (summary.escalation_name.clone(), summary.users.clone()),
            (None, None) => (None, Vec::new()),
        };

        // Frozen tickets show the server's static target; running ones the
        // live rung (or fallback summary) target.
        let live_target = match (step, summary) {
            (Some(step), _) => i64::try_from(step.scheduled_minutes).ok(),
            (None, Some(summary)) => summary.minutes,
            (None, None) => None,
        };
        let target = if snapshot.ticket.lifecycle().escalations_run() {
            format_minutes(live_target.or(static_target))
        } else {
            format_minutes(static_target)
        };

        TrackView {
            track,
            level: step.and(position.active.map(|i| i + 1)),
            escalation_name,
            users,
            target,
            countdown: countdown(position.remaining_secs),
            overdue: position.remaining_secs < 0,
            remaining_secs: position.remaining_secs,
            actual: actual.map(parse_hhmmss),
        }
    }

    fn golden_view(&self, snapshot: &TimerSnapshot) -> TrackView {
        let remaining_secs = self.remaining_secs(Track::Golden);
        let summary = snapshot.ticket_summary(Track::Golden);
        let reached = summary.is_some_and(|s| s.escalation_time.is_some()) && remaining_secs == 0;
        TrackView {
            track: Track::Golden,
            level: None,
            escalation_name: summary.and_then(|s| s.escalation_name.clone()),
            users: summary.map(|s| s.users.clone()).unwrap_or_default(),
            target: format_minutes(summary.and_then(|s| s.minutes)),
            countdown: countdown(remaining_secs),
            overdue: reached || summary.is_some_and(|s| s.is_overdue),
            remaining_secs,
            actual: None,
        }
    }
}

fn countdown(remaining_secs: i64) -> String {
    format_seconds(remaining_secs.saturating_abs())
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
