// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tat watch`: follow a ticket's countdowns until interrupted.
//!
//! Prints one frame per published view. Text frames are single lines;
//! JSON frames are compact objects, one per line.

use anyhow::Result;
use tat_core::SystemClock;
use tat_engine::{DriverConfig, TimerDriver, TimerView};
use tokio_util::sync::CancellationToken;

use super::{ticket_id, Remote};
use crate::color::alert;
use crate::exit_error::ExitError;
use crate::output::{any_overdue, format_frame, OutputFormat};

pub async fn handle(remote: &Remote, ticket: &str, format: OutputFormat) -> Result<()> {
    let id = ticket_id(ticket)?;
    let api = remote.client()?;
    let mut driver = TimerDriver::new(api, SystemClock, id, DriverConfig::from_env());
    driver.load().await.map_err(ExitError::from)?;

    let mut views = driver.subscribe();
    let cancel = CancellationToken::new();
    let task = tokio::spawn(driver.run(cancel.clone()));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let initial = views.borrow_and_update().clone();
    if let Some(view) = initial {
        print_frame(&view, format)?;
    }

    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                if let Some(view) = view {
                    print_frame(&view, format)?;
                }
            }
        }
    }

    cancel.cancel();
    task.await??;
    Ok(())
}

fn print_frame(view: &TimerView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text if any_overdue(view) => println!("{}", alert(&format_frame(view))),
        OutputFormat::Text => println!("{}", format_frame(view)),
        OutputFormat::Json => println!("{}", serde_json::to_string(view)?),
    }
    Ok(())
}
