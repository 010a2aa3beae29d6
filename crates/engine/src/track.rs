// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Countdown tracks and their per-second stepping.

use serde::Serialize;
use tat_core::{Ladder, TrackPosition};

/// One of the independent countdowns a ticket carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Track {
    Response,
    Resolution,
    /// Executive escalation; a single deadline, no ladder
    Golden,
}

tat_core::simple_display! {
    Track {
        Response => "response",
        Resolution => "resolution",
        Golden => "golden",
    }
}

/// Advance a ladder track by one second.
///
/// Returns true when the remainder crosses from positive to non-positive.
/// On that crossing the track moves to the successor rung, if any, and
/// restarts at the successor's full length. Without a successor the
/// remainder keeps going negative.
pub(crate) fn step_ladder_track(position: &mut TrackPosition, ladder: Option<&Ladder>) -> bool {
    let before = position.remaining_secs;
    position.remaining_secs = before.saturating_sub(1);
    if before <= 0 || position.remaining_secs > 0 {
        return false;
    }

    if let (Some(ladder), Some(index)) = (ladder, position.active) {
        if let Some(next) = ladder.successor(index) {
            position.active = Some(next);
            position.remaining_secs = ladder.step(next).map_or(0, |s| s.total_secs());
        }
    }
    true
}

/// Count a single-deadline track down by one second, holding at zero.
///
/// Returns true on the tick that reaches zero.
pub(crate) fn step_deadline_track(remaining_secs: &mut i64) -> bool {
    if *remaining_secs <= 0 {
        return false;
    }
    *remaining_secs -= 1;
    *remaining_secs == 0
}

#[cfg(test)]
#[path = "track_tests.rs"]
mod tests;
