// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use tat_adapters::ApiError;
use tat_core::TicketId;
use thiserror::Error;

/// Errors from the timer driver
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to load ticket {ticket}: {source}")]
    Load {
        ticket: TicketId,
        #[source]
        source: ApiError,
    },
}
