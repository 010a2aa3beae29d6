// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tat show`: load a ticket once and print its countdowns.

use anyhow::{anyhow, Result};
use tat_core::SystemClock;
use tat_engine::{DriverConfig, TimerDriver};

use super::{ticket_id, Remote};
use crate::exit_error::ExitError;
use crate::output::{format_or_json, print_view, OutputFormat};

pub async fn handle(remote: &Remote, ticket: &str, format: OutputFormat) -> Result<()> {
    let id = ticket_id(ticket)?;
    let api = remote.client()?;
    let mut driver = TimerDriver::new(api, SystemClock, id, DriverConfig::from_env());
    driver.load().await.map_err(ExitError::from)?;

    let view = driver.view().ok_or_else(|| anyhow!("ticket {ticket} loaded without a view"))?;
    format_or_json(format, &view, || print_view(&view))
}
