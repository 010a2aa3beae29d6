// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tat-core: ticket escalation domain for the TAT (turn-around-time) tools

pub mod macros;

pub mod clock;
pub mod coerce;
pub mod duration;
pub mod id;
pub mod ladder;
pub mod ticket;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use coerce::parse_timestamp_ms;
pub use duration::{format_minutes, format_seconds, parse_free_text_ageing, parse_hhmmss};
pub use id::TicketId;
pub use ladder::{EscalationStep, Ladder, LadderResponse, TrackPosition};
#[cfg(any(test, feature = "test-support"))]
pub use ticket::TicketBuilder;
pub use ticket::{EscalationSummary, Lifecycle, Ticket};
