// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;
use tat_engine::{TimerView, TrackView};

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print `data` as pretty JSON, or run `text_fn` for text output.
pub fn format_or_json<T: Serialize>(
    format: OutputFormat,
    data: &T,
    text_fn: impl FnOnce(),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Text => {
            text_fn();
        }
    }
    Ok(())
}

/// One line per track: rung, target, remaining (or overrun) and assignees.
pub fn format_track_line(track: &TrackView, paused: bool) -> String {
    let mut line = format!("{:<11}", track.track.to_string());
    if let Some(level) = track.level {
        let _ = write!(line, "L{level} ");
    }
    if let Some(name) = &track.escalation_name {
        let _ = write!(line, "{name} ");
    }
    let verb = if track.overdue { "over" } else { "left" };
    let _ = write!(line, "target {}  {verb} {}", track.target, track.countdown);
    if paused {
        line.push_str(" (paused)");
    }
    if !track.users.is_empty() {
        let _ = write!(line, "  -> {}", track.users.join(", "));
    }
    line
}

/// Title line for a ticket view.
pub fn format_title(view: &TimerView) -> String {
    let mut title = format!("Ticket {}", view.ticket_id);
    if let Some(number) = &view.ticket_number {
        let _ = write!(title, " ({number})");
    }
    if let Some(heading) = &view.heading {
        let _ = write!(title, " {heading}");
    }
    title
}

/// Body lines of the text rendering of a ticket view.
pub fn format_view_body(view: &TimerView) -> Vec<String> {
    let status = if view.status.is_empty() { "-" } else { view.status.as_str() };
    let mut lines = vec![format!("{:<11}{status}", "status")];

    let mut ageing = format!("{:<11}{}", "ageing", view.ageing);
    if view.is_closed {
        ageing.push_str(" (stopped)");
    }
    if let Some(server) = &view.server_ageing {
        let _ = write!(ageing, "  server {server}");
    }
    lines.push(ageing);

    let paused = view.is_closed || view.is_on_hold;
    lines.push(format_track_line(&view.response, paused));
    lines.push(format_track_line(&view.resolution, paused));
    if let Some(golden) = &view.golden {
        lines.push(format_track_line(golden, false));
    }

    for track in [&view.response, &view.resolution] {
        if let Some(actual) = &track.actual {
            lines.push(format!("{:<11}{} {actual}", "actual", track.track));
        }
    }
    lines
}

/// Whether any displayed track shows an overrun.
pub fn any_overdue(view: &TimerView) -> bool {
    let tracks = [Some(&view.response), Some(&view.resolution), view.golden.as_ref()];
    tracks.into_iter().flatten().any(|t| t.overdue)
}

/// Print a ticket view as text.
pub fn print_view(view: &TimerView) {
    println!("{}", color::header(&format_title(view)));
    for line in format_view_body(view) {
        println!("{line}");
    }
    println!("{}", color::context(&format!("snapshot {}", view.generation)));
}

/// Compact single-line frame for live output.
pub fn format_frame(view: &TimerView) -> String {
    let mut frame = format!("ageing {}", view.ageing);
    let tracks = [Some(&view.response), Some(&view.resolution), view.golden.as_ref()];
    for track in tracks.into_iter().flatten() {
        let verb = if track.overdue { "over" } else { "left" };
        let _ = write!(frame, " | {} {verb} {}", track.track, track.countdown);
    }
    if view.is_closed {
        frame.push_str(" | closed");
    } else if view.is_on_hold {
        frame.push_str(" | on hold");
    }
    frame
}
