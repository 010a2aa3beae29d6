// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

use tat_adapters::ApiError;
use tat_engine::DriverError;

/// Missing or invalid backend configuration
pub const EXIT_CONFIG: i32 = 2;
/// The backend does not know the ticket
pub const EXIT_NOT_FOUND: i32 = 3;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<ApiError> for ExitError {
    fn from(e: ApiError) -> Self {
        match &e {
            ApiError::InvalidConfig(_) => ExitError::new(EXIT_CONFIG, e.to_string()),
            ApiError::Status { status: 404, .. } => ExitError::new(EXIT_NOT_FOUND, e.to_string()),
            _ => ExitError::new(1, e.to_string()),
        }
    }
}

impl From<DriverError> for ExitError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::Load { ticket, source: ApiError::Status { status: 404, .. } } => {
                ExitError::new(EXIT_NOT_FOUND, format!("ticket not found: {ticket}"))
            }
            DriverError::Load { ticket, source } => {
                let inner = ExitError::from(source);
                ExitError::new(inner.code, format!("failed to load ticket {ticket}: {inner}"))
            }
        }
    }
}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
