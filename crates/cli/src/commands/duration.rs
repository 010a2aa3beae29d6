// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tat duration`: offline duration rendering.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tat_core::{format_minutes, format_seconds, parse_free_text_ageing, parse_hhmmss};

use crate::output::{format_or_json, OutputFormat};

#[derive(Args)]
pub struct DurationArgs {
    #[command(subcommand)]
    pub command: DurationCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum DurationCommand {
    /// Render a minute count as DD:HH:MM
    Minutes {
        /// Whole minutes; blank or non-numeric renders as zero
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Render a second count as DD:HH:MM:SS
    Seconds {
        /// Whole seconds; non-positive or non-numeric renders as zero
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Normalize backend ageing text ("52 hour 20 min" or bare minutes)
    Ageing { text: String },
    /// Render an HH:MM:SS actual as DD:HH:MM
    Hms { text: String },
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Rendered {
    pub kind: &'static str,
    pub input: String,
    pub formatted: String,
}

pub fn render(command: &DurationCommand) -> Rendered {
    let (kind, input, formatted) = match command {
        DurationCommand::Minutes { value } => {
            ("minutes", value, format_minutes(value.trim().parse().ok()))
        }
        DurationCommand::Seconds { value } => {
            ("seconds", value, format_seconds(value.trim().parse().unwrap_or(0)))
        }
        DurationCommand::Ageing { text } => ("ageing", text, parse_free_text_ageing(text)),
        DurationCommand::Hms { text } => ("hms", text, parse_hhmmss(text)),
    };
    Rendered { kind, input: input.clone(), formatted }
}

pub fn handle(args: DurationArgs, format: OutputFormat) -> Result<()> {
    let rendered = render(&args.command);
    format_or_json(format, &rendered, || println!("{}", rendered.formatted))
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
