// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::ladder::{EscalationStep, Ladder, LadderResponse};
use crate::ticket::{EscalationSummary, Ticket};

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for ladders and ticket statuses.
pub mod strategies {
    use super::ladder_secs;
    use crate::ladder::Ladder;
    use proptest::prelude::*;

    /// Ladders of one to five rungs, each up to ten minutes long.
    pub fn arb_ladder() -> impl Strategy<Value = Ladder> {
        prop::collection::vec(0u64..600, 1..6).prop_map(|totals| ladder_secs(&totals))
    }

    pub fn arb_status() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Open".to_string()),
            Just("Pending".to_string()),
            Just("On Hold".to_string()),
            Just("Closed".to_string()),
            Just("Complete".to_string()),
            "[a-zA-Z ]{0,12}",
        ]
    }
}

// ── Fixture factories ─────────────────────────────────────────────────

/// A ladder whose rungs last the given numbers of seconds.
pub fn ladder_secs(totals: &[u64]) -> Ladder {
    Ladder::new(
        totals
            .iter()
            .enumerate()
            .map(|(i, total)| {
                EscalationStep::new(format!("E{}", i + 1), total / 60, (total % 60) as u8)
                    .with_users([format!("user-{}", i + 1)])
            })
            .collect(),
    )
}

pub fn sequence_secs(totals: &[u64]) -> LadderResponse {
    LadderResponse::Sequence(ladder_secs(totals))
}

/// An open ticket created `age_secs` seconds before `now_ms`.
pub fn ticket_aged(id: &str, now_ms: u64, age_secs: u64) -> Ticket {
    Ticket::builder().id(id).created_at_ms(now_ms.saturating_sub(age_secs * 1000)).build()
}

/// Escalation summary with an absolute deadline.
pub fn summary_due_at(name: &str, deadline_ms: u64) -> EscalationSummary {
    EscalationSummary {
        escalation_name: Some(name.to_string()),
        escalation_time: Some(deadline_ms),
        users: vec![format!("{name}-owner")],
        ..Default::default()
    }
}
