// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tat`: ticket escalation countdowns from the command line.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod exit_error;
mod logging;
mod output;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use commands::duration::DurationArgs;
use commands::locate::LocateArgs;
use commands::Remote;
use exit_error::ExitError;
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "tat",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")"),
    about = "Ticket escalation and turnaround-time countdowns",
    styles = color::styles()
)]
struct Cli {
    /// Backend base URL (default: $TAT_API_BASE_URL)
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<String>,

    /// Bearer token for the backend (default: $TAT_API_TOKEN)
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value_t)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Load a ticket once and print its countdowns
    Show {
        /// Ticket id
        ticket: String,
    },
    /// Follow a ticket's countdowns live until interrupted
    Watch {
        /// Ticket id
        ticket: String,
    },
    /// Print the backend's task-creation data for a ticket
    TaskData {
        /// Ticket id
        ticket: String,
    },
    /// Render durations offline
    Duration(DurationArgs),
    /// Find the active rung of an ad-hoc ladder offline
    Locate(LocateArgs),
}

#[tokio::main]
async fn main() {
    let code = match run().await {
        Ok(()) => 0,
        Err(e) => report(&e),
    };
    std::process::exit(code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init()?;

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let remote = Remote { base_url: cli.base_url, token: cli.token };
    let format = cli.format;
    match command {
        Command::Show { ticket } => commands::show::handle(&remote, &ticket, format).await,
        Command::Watch { ticket } => commands::watch::handle(&remote, &ticket, format).await,
        Command::TaskData { ticket } => commands::task::handle(&remote, &ticket).await,
        Command::Duration(args) => commands::duration::handle(args, format),
        Command::Locate(args) => commands::locate::handle(args, format),
    }
}

fn report(e: &anyhow::Error) -> i32 {
    if let Some(exit) = e.downcast_ref::<ExitError>() {
        if !exit.message.is_empty() {
            eprintln!("Error: {}", exit.message);
        }
        return exit.code;
    }
    eprintln!("Error: {e:#}");
    1
}
