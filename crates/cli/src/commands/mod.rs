// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod duration;
pub mod locate;
pub mod show;
pub mod task;
pub mod watch;

use tat_adapters::{ApiConfig, HttpTicketApi};
use tat_core::TicketId;

use crate::exit_error::{ExitError, EXIT_CONFIG};

/// Backend connection flags shared by the networked commands.
#[derive(Debug, Clone, Default)]
pub struct Remote {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

impl Remote {
    pub fn client(&self) -> Result<HttpTicketApi, ExitError> {
        let config = ApiConfig::resolve(self.base_url.clone(), self.token.clone())?;
        Ok(HttpTicketApi::new(config)?)
    }
}

/// Validate a ticket id argument.
pub fn ticket_id(raw: &str) -> Result<TicketId, ExitError> {
    let id = TicketId::new(raw.trim());
    if id.is_empty() {
        return Err(ExitError::new(EXIT_CONFIG, "ticket id must not be empty"));
    }
    Ok(id)
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
