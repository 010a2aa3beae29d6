// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `tat task-data`: print the backend's task-creation payload for a ticket.

use anyhow::Result;
use tat_adapters::TicketApi;

use super::{ticket_id, Remote};
use crate::exit_error::ExitError;

pub async fn handle(remote: &Remote, ticket: &str) -> Result<()> {
    let id = ticket_id(ticket)?;
    let api = remote.client()?;
    let data = api.create_task_data(&id).await.map_err(ExitError::from)?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
