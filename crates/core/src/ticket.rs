// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ticket record and lifecycle gate.
//!
//! A `Ticket` is read-mostly: it is replaced wholesale whenever the backend
//! is re-queried and never patched field by field.

use crate::coerce::{lenient_bool, lenient_i64, lenient_string, lenient_timestamp_ms, string_list};
use crate::id::TicketId;
use serde::{Deserialize, Serialize};

/// Statuses that mean the ticket is finished.
const CLOSED_STATUSES: &[&str] = &["complete", "completed", "close", "closed"];
/// Statuses that pause escalation countdowns.
const ON_HOLD_STATUSES: &[&str] = &["on hold"];

/// Server-computed summary of the next pending escalation on a track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationSummary {
    #[serde(default, alias = "escalationName", deserialize_with = "lenient_string")]
    pub escalation_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub minutes: Option<i64>,
    /// Absolute deadline, epoch milliseconds
    #[serde(default, alias = "escalationTime", deserialize_with = "lenient_timestamp_ms")]
    pub escalation_time: Option<u64>,
    #[serde(default, deserialize_with = "string_list")]
    pub users: Vec<String>,
    #[serde(default, alias = "copyTo", deserialize_with = "string_list")]
    pub copy_to: Vec<String>,
    #[serde(default, alias = "isOverdue", deserialize_with = "lenient_bool")]
    pub is_overdue: bool,
}

impl EscalationSummary {
    /// Seconds until this escalation fires, preferring the absolute deadline
    /// over the relative minute count. `None` when neither is present.
    pub fn remaining_secs(&self, now_ms: u64) -> Option<i64> {
        if let Some(deadline) = self.escalation_time {
            return Some(signed_secs_between(now_ms, deadline));
        }
        self.minutes.map(|m| m.saturating_mul(60))
    }
}

/// Derived lifecycle flags gating the escalation countdowns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Lifecycle {
    pub is_closed: bool,
    pub is_on_hold: bool,
}

impl Lifecycle {
    pub fn from_status(status: &str) -> Self {
        let status = status.trim().to_lowercase();
        Self {
            is_closed: CLOSED_STATUSES.contains(&status.as_str()),
            is_on_hold: ON_HOLD_STATUSES.contains(&status.as_str()),
        }
    }

    /// Escalation tracks advance only while the ticket is neither closed
    /// nor on hold.
    pub fn escalations_run(&self) -> bool {
        !self.is_closed && !self.is_on_hold
    }

    /// Ageing keeps counting through holds; only closure stops it.
    pub fn ageing_runs(&self) -> bool {
        !self.is_closed
    }
}

/// A ticket (complaint) as returned by the ticket details endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    #[serde(default, alias = "ticketNumber", deserialize_with = "lenient_string")]
    pub ticket_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub heading: Option<String>,
    #[serde(default, alias = "issueStatus", deserialize_with = "lenient_string")]
    pub issue_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub priority: Option<String>,
    /// Creation time, epoch milliseconds
    #[serde(
        default,
        rename = "created_at",
        alias = "createdAt",
        deserialize_with = "lenient_timestamp_ms"
    )]
    pub created_at_ms: Option<u64>,
    /// Server static response target, minutes
    #[serde(default, alias = "responseTat", deserialize_with = "lenient_i64")]
    pub response_tat: Option<i64>,
    /// Server static resolution target, minutes
    #[serde(default, alias = "resolutionTat", deserialize_with = "lenient_i64")]
    pub resolution_tat: Option<i64>,
    /// Actual response time, `HH:MM:SS`
    #[serde(default, alias = "responseTime", deserialize_with = "lenient_string")]
    pub response_time: Option<String>,
    /// Actual resolution time, `HH:MM:SS`
    #[serde(default, alias = "resolutionTime", deserialize_with = "lenient_string")]
    pub resolution_time: Option<String>,
    /// Server-rendered ageing, free text (`"52 hour 20 min"` or minutes)
    #[serde(default, deserialize_with = "lenient_string")]
    pub ageing: Option<String>,
    #[serde(default, alias = "isGoldenTicket", deserialize_with = "lenient_bool")]
    pub is_golden_ticket: bool,
    #[serde(default, alias = "nextResponseEscalation")]
    pub next_response_escalation: Option<EscalationSummary>,
    #[serde(default, alias = "nextResolutionEscalation")]
    pub next_resolution_escalation: Option<EscalationSummary>,
    #[serde(default, alias = "nextExecutiveEscalation")]
    pub next_executive_escalation: Option<EscalationSummary>,
}

impl Ticket {
    pub fn status(&self) -> &str {
        self.issue_status.as_deref().unwrap_or_default()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from_status(self.status())
    }

    /// Whole seconds since creation, clamped at zero. A ticket without a
    /// creation time has aged zero seconds.
    pub fn elapsed_secs(&self, now_ms: u64) -> i64 {
        self.created_at_ms.map_or(0, |created| signed_secs_between(created, now_ms).max(0))
    }

    /// Whether the golden (executive) track applies to this ticket.
    pub fn has_golden_track(&self) -> bool {
        self.is_golden_ticket || self.next_executive_escalation.is_some()
    }
}

/// Whole seconds from `from_ms` to `to_ms`, negative when `to_ms` is earlier.
pub(crate) fn signed_secs_between(from_ms: u64, to_ms: u64) -> i64 {
    // u64 milliseconds divided down to seconds always fit in i64
    ((i128::from(to_ms) - i128::from(from_ms)) / 1000) as i64
}

crate::builder! {
    pub struct TicketBuilder => Ticket {
        into {
            id: TicketId = "1",
        }
        set {
            is_golden_ticket: bool = false,
        }
        option {
            ticket_number: String = None,
            heading: String = None,
            issue_status: String = Some("Open".to_string()),
            priority: String = None,
            created_at_ms: u64 = None,
            response_tat: i64 = None,
            resolution_tat: i64 = None,
            response_time: String = None,
            resolution_time: String = None,
            ageing: String = None,
            next_response_escalation: EscalationSummary = None,
            next_resolution_escalation: EscalationSummary = None,
            next_executive_escalation: EscalationSummary = None,
        }
    }
}

#[cfg(test)]
#[path = "ticket_tests.rs"]
mod tests;
