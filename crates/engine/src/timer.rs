// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Escalation timer state machine.
//!
//! [`EscalationTimer`] owns the live countdowns for one ticket. It never
//! reads a clock: callers pass `now_ms` into [`EscalationTimer::load`] and
//! [`EscalationTimer::catch_up`], or step it directly with
//! [`EscalationTimer::tick`].
//!
//! Every distinct [`TimerSnapshot`] is loaded exactly once. Loading rebuilds
//! all track state from the elapsed time since creation; reloading the same
//! generation is a no-op so a running countdown is never rewound.

use std::sync::Arc;

use tat_core::{EscalationSummary, LadderResponse, Lifecycle, Ticket, TrackPosition};

use crate::track::{step_deadline_track, step_ladder_track, Track};

const TICK_MS: u64 = 1000;

/// Immutable input to the timer: one fetch of ticket and ladder data.
#[derive(Debug, Clone)]
pub struct TimerSnapshot {
    /// Identity of this snapshot; bumped by the owner on every fetch
    pub generation: u64,
    pub ticket: Arc<Ticket>,
    pub response: Arc<LadderResponse>,
    pub resolution: Arc<LadderResponse>,
}

impl TimerSnapshot {
    pub fn new(
        generation: u64,
        ticket: Ticket,
        response: LadderResponse,
        resolution: LadderResponse,
    ) -> Self {
        Self {
            generation,
            ticket: Arc::new(ticket),
            response: Arc::new(response),
            resolution: Arc::new(resolution),
        }
    }

    pub fn ladder_response(&self, track: Track) -> Option<&LadderResponse> {
        match track {
            Track::Response => Some(&self.response),
            Track::Resolution => Some(&self.resolution),
            Track::Golden => None,
        }
    }

    /// The ticket's embedded next-escalation summary for a track.
    pub fn ticket_summary(&self, track: Track) -> Option<&EscalationSummary> {
        match track {
            Track::Response => self.ticket.next_response_escalation.as_ref(),
            Track::Resolution => self.ticket.next_resolution_escalation.as_ref(),
            Track::Golden => self.ticket.next_executive_escalation.as_ref(),
        }
    }

    /// Summary used when a track has no ladder: the ticket's own summary,
    /// else a single summary returned by the timings endpoint.
    pub fn fallback_summary(&self, track: Track) -> Option<&EscalationSummary> {
        self.ticket_summary(track)
            .or_else(|| self.ladder_response(track).and_then(LadderResponse::summary))
    }
}

/// Tunables for tick behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerPolicy {
    /// Freeze the golden countdown while the ticket is on hold or closed.
    /// Off by default: the executive deadline keeps running.
    pub freeze_golden_on_hold: bool,
}

/// Tracks that crossed from positive to non-positive remaining time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub crossed: Vec<Track>,
}

impl TickOutcome {
    /// A backend refresh is due; at most one regardless of how many tracks crossed.
    pub fn needs_refresh(&self) -> bool {
        !self.crossed.is_empty()
    }

    fn merge(&mut self, other: TickOutcome) {
        for track in other.crossed {
            if !self.crossed.contains(&track) {
                self.crossed.push(track);
            }
        }
    }
}

/// Live countdown state for one ticket
#[derive(Debug, Clone)]
pub struct EscalationTimer {
    policy: TimerPolicy,
    snapshot: Option<TimerSnapshot>,
    response: TrackPosition,
    resolution: TrackPosition,
    golden_secs: i64,
    ageing_secs: i64,
    /// Wall-clock instant the last applied second corresponds to
    last_tick_ms: u64,
}

impl EscalationTimer {
    pub fn new(policy: TimerPolicy) -> Self {
        Self {
            policy,
            snapshot: None,
            response: TrackPosition::NONE,
            resolution: TrackPosition::NONE,
            golden_secs: 0,
            ageing_secs: 0,
            last_tick_ms: 0,
        }
    }

    /// Initialize all tracks from a snapshot.
    ///
    /// Returns false without touching any state when this snapshot's
    /// generation is already loaded.
    ///
    /// A counter that was frozen under the previous snapshot and is still
    /// frozen under this one keeps its value: escalation positions while the
    /// ticket stays on hold or closed (and its ladders are unchanged), the
    /// golden countdown likewise when the policy freezes it, and ageing while
    /// the ticket stays closed.
    pub fn load(&mut self, snapshot: &TimerSnapshot, now_ms: u64) -> bool {
        if self.generation() == Some(snapshot.generation) {
            return false;
        }

        let next = snapshot.ticket.lifecycle();
        let (keep_escalations, keep_ageing) = match &self.snapshot {
            Some(previous) => {
                let prior = previous.ticket.lifecycle();
                let frozen = !prior.escalations_run() && !next.escalations_run();
                let same_ladders = previous.response == snapshot.response
                    && previous.resolution == snapshot.resolution;
                (frozen && same_ladders, !prior.ageing_runs() && !next.ageing_runs())
            }
            None => (false, false),
        };

        let elapsed = snapshot.ticket.elapsed_secs(now_ms);
        if !keep_escalations {
            self.response = initial_position(snapshot, Track::Response, elapsed, now_ms);
            self.resolution = initial_position(snapshot, Track::Resolution, elapsed, now_ms);
        }
        if !(keep_escalations && self.policy.freeze_golden_on_hold) {
            self.golden_secs = snapshot
                .ticket_summary(Track::Golden)
                .filter(|s| s.escalation_time.is_some())
                .and_then(|s| s.remaining_secs(now_ms))
                .unwrap_or(0)
                .max(0);
        }
        if !keep_ageing {
            self.ageing_secs = elapsed;
        }
        self.last_tick_ms = now_ms;
        self.snapshot = Some(snapshot.clone());

        tracing::debug!(
            ticket = %snapshot.ticket.id,
            generation = snapshot.generation,
            elapsed,
            frozen = keep_escalations,
            response = self.response.remaining_secs,
            resolution = self.resolution.remaining_secs,
            golden = self.golden_secs,
            "timer loaded"
        );
        true
    }

    /// Apply exactly one second.
    ///
    /// Ageing advances unless the ticket is closed. Response and resolution
    /// are left untouched while the ticket is on hold or closed. The golden
    /// deadline runs unless the policy freezes it.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(snapshot) = &self.snapshot else {
            return TickOutcome::default();
        };
        let lifecycle = snapshot.ticket.lifecycle();
        let mut outcome = TickOutcome::default();

        if lifecycle.ageing_runs() {
            self.ageing_secs = self.ageing_secs.saturating_add(1);
        }

        if lifecycle.escalations_run() {
            if step_ladder_track(&mut self.response, snapshot.response.ladder()) {
                outcome.crossed.push(Track::Response);
            }
            if step_ladder_track(&mut self.resolution, snapshot.resolution.ladder()) {
                outcome.crossed.push(Track::Resolution);
            }
        }

        let golden_frozen = self.policy.freeze_golden_on_hold && !lifecycle.escalations_run();
        if !golden_frozen && step_deadline_track(&mut self.golden_secs) {
            outcome.crossed.push(Track::Golden);
        }

        self.last_tick_ms = self.last_tick_ms.saturating_add(TICK_MS);

        for track in &outcome.crossed {
            tracing::info!(
                ticket = %snapshot.ticket.id,
                track = %track,
                "escalation window reached"
            );
        }
        outcome
    }

    /// Apply every whole second between the last applied tick and `now_ms`.
    ///
    /// A clock that moved backwards applies nothing.
    pub fn catch_up(&mut self, now_ms: u64) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.snapshot.is_none() {
            return outcome;
        }
        let due = now_ms.saturating_sub(self.last_tick_ms) / TICK_MS;
        if due > 1 {
            tracing::debug!(seconds = due, "catching up missed ticks");
        }
        for _ in 0..due {
            outcome.merge(self.tick());
        }
        outcome
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn generation(&self) -> Option<u64> {
        self.snapshot.as_ref().map(|s| s.generation)
    }

    pub fn snapshot(&self) -> Option<&TimerSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.snapshot.as_ref().map(|s| s.ticket.lifecycle()).unwrap_or_default()
    }

    /// Position of a ladder track. The golden track has no rung, only a
    /// remainder.
    pub fn position(&self, track: Track) -> TrackPosition {
        match track {
            Track::Response => self.response,
            Track::Resolution => self.resolution,
            Track::Golden => TrackPosition { active: None, remaining_secs: self.golden_secs },
        }
    }

    pub fn remaining_secs(&self, track: Track) -> i64 {
        self.position(track).remaining_secs
    }

    pub fn ageing_secs(&self) -> i64 {
        self.ageing_secs
    }

    pub fn last_tick_ms(&self) -> u64 {
        self.last_tick_ms
    }
}

/// Starting position for a ladder track.
///
/// Uses the ladder when one is present. Otherwise it counts down to the
/// fallback summary's deadline (or its minutes), or sits at zero.
fn initial_position(
    snapshot: &TimerSnapshot,
    track: Track,
    elapsed_secs: i64,
    now_ms: u64,
) -> TrackPosition {
    if let Some(ladder) = snapshot.ladder_response(track).and_then(LadderResponse::ladder) {
        return ladder.locate(elapsed_secs);
    }
    let remaining_secs =
        snapshot.fallback_summary(track).and_then(|s| s.remaining_secs(now_ms)).unwrap_or(0);
    TrackPosition { active: None, remaining_secs }
}

impl Default for EscalationTimer {
    fn default() -> Self {
        Self::new(TimerPolicy::default())
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
