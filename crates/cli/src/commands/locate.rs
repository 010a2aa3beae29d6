// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tat locate`: find the active rung of an ad-hoc ladder.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tat_core::{format_seconds, EscalationStep, Ladder};

use crate::output::{format_or_json, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct LocateArgs {
    /// Rung length in seconds; repeat once per rung, in order
    #[arg(long = "step", value_name = "SECS")]
    pub steps: Vec<u64>,
    /// Seconds elapsed since ticket creation
    #[arg(long, value_name = "SECS")]
    pub elapsed: u64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Located {
    pub rungs: usize,
    /// 1-based active rung
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
    pub remaining_secs: i64,
    pub countdown: String,
    pub overdue: bool,
}

/// Ladder of rungs named `E1..En` with the given lengths.
pub fn build_ladder(steps: &[u64]) -> Ladder {
    Ladder::new(
        steps
            .iter()
            .enumerate()
            .map(|(i, secs)| {
                EscalationStep::new(format!("E{}", i + 1), secs / 60, (secs % 60) as u8)
            })
            .collect(),
    )
}

pub fn locate(args: &LocateArgs) -> Located {
    let ladder = build_ladder(&args.steps);
    let elapsed = i64::try_from(args.elapsed).unwrap_or(i64::MAX);
    let position = ladder.locate(elapsed);
    Located {
        rungs: ladder.len(),
        level: position.active.map(|i| i + 1),
        remaining_secs: position.remaining_secs,
        countdown: format_seconds(position.remaining_secs.saturating_abs()),
        overdue: position.remaining_secs < 0,
    }
}

pub fn describe(located: &Located) -> String {
    match located.level {
        None => "no ladder".to_string(),
        Some(level) => {
            let verb = if located.overdue { "over" } else { "left" };
            format!(
                "rung {level} of {}  {verb} {} ({}s)",
                located.rungs, located.countdown, located.remaining_secs
            )
        }
    }
}

pub fn handle(args: LocateArgs, format: OutputFormat) -> Result<()> {
    let located = locate(&args);
    format_or_json(format, &located, || println!("{}", describe(&located)))
}

#[cfg(test)]
#[path = "locate_tests.rs"]
mod tests;
