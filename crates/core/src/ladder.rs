// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Escalation ladders.
//!
//! A ladder is an ordered list of rungs laid end to end starting at ticket
//! creation. Rung `i` owns the half-open window
//! `[consumed_i, consumed_i + total_i)`, so the boundary instant belongs to
//! the next rung and zero-length rungs are never active.

use crate::coerce::{lenient_i64, lenient_string, string_list};
use crate::ticket::EscalationSummary;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rung lengths saturate here so that second arithmetic cannot overflow.
const MAX_RUNG_MINUTES: u64 = (i64::MAX / 120) as u64;

/// One rung of an escalation ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawStep")]
pub struct EscalationStep {
    pub escalation_name: Option<String>,
    pub scheduled_minutes: u64,
    /// Extra precision on top of the minutes, 0..=59
    pub scheduled_seconds: u8,
    pub escalate_to_users: Vec<String>,
}

impl EscalationStep {
    pub fn new(name: impl Into<String>, minutes: u64, seconds: u8) -> Self {
        Self {
            escalation_name: Some(name.into()),
            scheduled_minutes: minutes,
            scheduled_seconds: seconds.min(59),
            escalate_to_users: Vec::new(),
        }
    }

    pub fn with_users(mut self, users: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.escalate_to_users = users.into_iter().map(Into::into).collect();
        self
    }

    /// Rung length in seconds
    pub fn total_secs(&self) -> i64 {
        let minutes = self.scheduled_minutes.min(MAX_RUNG_MINUTES) as i64;
        minutes * 60 + i64::from(self.scheduled_seconds)
    }
}

/// Wire form of a rung; clamped into an [`EscalationStep`].
#[derive(Deserialize)]
struct RawStep {
    #[serde(
        default,
        alias = "escalationName",
        alias = "name",
        deserialize_with = "lenient_string"
    )]
    escalation_name: Option<String>,
    #[serde(
        default,
        alias = "minutes",
        alias = "scheduledMinutes",
        deserialize_with = "lenient_i64"
    )]
    scheduled_minutes: Option<i64>,
    #[serde(
        default,
        alias = "seconds",
        alias = "scheduledSeconds",
        deserialize_with = "lenient_i64"
    )]
    scheduled_seconds: Option<i64>,
    #[serde(
        default,
        alias = "users",
        alias = "escalateToUsers",
        deserialize_with = "string_list"
    )]
    escalate_to_users: Vec<String>,
}

impl From<RawStep> for EscalationStep {
    fn from(raw: RawStep) -> Self {
        Self {
            escalation_name: raw.escalation_name,
            scheduled_minutes: raw.scheduled_minutes.unwrap_or(0).max(0) as u64,
            scheduled_seconds: raw.scheduled_seconds.unwrap_or(0).clamp(0, 59) as u8,
            escalate_to_users: raw.escalate_to_users,
        }
    }
}

/// Where elapsed time falls on a ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackPosition {
    /// Active rung; `None` when there is no ladder
    pub active: Option<usize>,
    /// Seconds left in the active rung; negative once the final rung is exceeded
    pub remaining_secs: i64,
}

impl TrackPosition {
    pub const NONE: TrackPosition = TrackPosition { active: None, remaining_secs: 0 };
}

/// An ordered, immutable sequence of escalation rungs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ladder {
    steps: Vec<EscalationStep>,
}

impl Ladder {
    pub fn new(steps: Vec<EscalationStep>) -> Self {
        Self { steps }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&EscalationStep> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[EscalationStep] {
        &self.steps
    }

    pub fn total_secs(&self) -> i64 {
        self.steps.iter().map(EscalationStep::total_secs).fold(0, i64::saturating_add)
    }

    /// Locate the active rung after `elapsed_secs` seconds.
    ///
    /// Past the end of the ladder the final rung stays active with a
    /// non-positive remainder measuring the overrun.
    pub fn locate(&self, elapsed_secs: i64) -> TrackPosition {
        let Some(last) = self.steps.last() else {
            return TrackPosition::NONE;
        };
        let mut consumed: i64 = 0;
        for (index, step) in self.steps.iter().enumerate() {
            let total = step.total_secs();
            if elapsed_secs < consumed.saturating_add(total) {
                return TrackPosition {
                    active: Some(index),
                    remaining_secs: total - (elapsed_secs - consumed),
                };
            }
            consumed = consumed.saturating_add(total);
        }
        let last_total = last.total_secs();
        let consumed_before_last = consumed - last_total;
        TrackPosition {
            active: Some(self.steps.len() - 1),
            remaining_secs: last_total - (elapsed_secs - consumed_before_last),
        }
    }

    /// Rung that takes over when rung `index` runs out.
    ///
    /// Skips zero-length rungs, landing on the final rung when only empty
    /// rungs remain. `None` when `index` is already the final rung.
    pub fn successor(&self, index: usize) -> Option<usize> {
        let last = self.steps.len().checked_sub(1)?;
        if index >= last {
            return None;
        }
        let next_nonempty = self.steps[index + 1..]
            .iter()
            .position(|s| s.total_secs() > 0)
            .map(|offset| index + 1 + offset);
        Some(next_nonempty.unwrap_or(last))
    }
}

/// What a TAT timings endpoint returned, decided once at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LadderResponse {
    /// A multi-rung ladder
    Sequence(Ladder),
    /// A single escalation summary rather than a ladder
    Single(EscalationSummary),
    /// Nothing usable
    #[default]
    Absent,
}

impl LadderResponse {
    /// Classify a raw endpoint payload.
    ///
    /// Arrays become ladders (entries that are not objects are dropped),
    /// objects become single summaries, everything else is absent.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => {
                let total = items.len();
                let steps: Vec<EscalationStep> = items
                    .into_iter()
                    .filter(Value::is_object)
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect();
                if steps.len() != total {
                    tracing::debug!(
                        dropped = total - steps.len(),
                        "ignoring malformed escalation ladder entries"
                    );
                }
                LadderResponse::Sequence(Ladder::new(steps))
            }
            Value::Object(_) => match serde_json::from_value(value) {
                Ok(summary) => LadderResponse::Single(summary),
                Err(e) => {
                    tracing::debug!(error = %e, "unrecognized escalation summary");
                    LadderResponse::Absent
                }
            },
            _ => LadderResponse::Absent,
        }
    }

    /// The ladder, when one is present with at least one rung.
    pub fn ladder(&self) -> Option<&Ladder> {
        match self {
            LadderResponse::Sequence(ladder) if !ladder.is_empty() => Some(ladder),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&EscalationSummary> {
        match self {
            LadderResponse::Single(summary) => Some(summary),
            _ => None,
        }
    }
}

crate::simple_display! {
    LadderResponse {
        Sequence(..) => "sequence",
        Single(..) => "single",
        Absent => "absent",
    }
}

#[cfg(test)]
#[path = "ladder_tests.rs"]
mod tests;
