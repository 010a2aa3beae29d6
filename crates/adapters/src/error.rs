// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from the ticket management backend
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {path}: {body}")]
    Status { status: u16, path: String, body: String },

    #[error("invalid response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("invalid API configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    /// Server-side or connectivity failures that may succeed on a later try.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Http(e) => e.is_timeout() || e.is_connect(),
            ApiError::Status { status, .. } => *status >= 500 || *status == 429,
            ApiError::Unavailable(_) => true,
            ApiError::Decode { .. } | ApiError::InvalidConfig(_) => false,
        }
    }
}
