// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tat-engine: escalation timer state machine and its async driver

mod driver;
pub mod env;
mod error;
mod timer;
mod track;
mod view;

pub use driver::{DriverConfig, RefreshReason, TimerDriver};
pub use error::DriverError;
pub use timer::{EscalationTimer, TickOutcome, TimerPolicy, TimerSnapshot};
pub use track::Track;
pub use view::{TimerView, TrackView};
