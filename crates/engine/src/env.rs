// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the timer driver.

use std::time::Duration;

/// Tick period (default 1s, configurable via `TAT_TICK_MS`).
pub fn tick_interval() -> Duration {
    std::env::var("TAT_TICK_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(1))
}

/// Heartbeat re-sync period (default 30s via `TAT_RESYNC_SECS`; `0` disables).
pub fn resync_interval() -> Option<Duration> {
    let secs = std::env::var("TAT_RESYNC_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(30);
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Whether the golden countdown freezes on hold (`TAT_GOLDEN_FREEZE_ON_HOLD`).
pub fn golden_freeze_on_hold() -> bool {
    std::env::var("TAT_GOLDEN_FREEZE_ON_HOLD")
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
