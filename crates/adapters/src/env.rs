// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the backend client.

use std::fmt;
use std::time::Duration;

use crate::error::ApiError;

/// Base URL of the ticket management backend (`TAT_API_BASE_URL`).
pub fn api_base_url() -> Option<String> {
    std::env::var("TAT_API_BASE_URL").ok().filter(|s| !s.trim().is_empty())
}

/// Bearer token sent with every request (`TAT_API_TOKEN`).
pub fn api_token() -> Option<String> {
    std::env::var("TAT_API_TOKEN").ok().filter(|s| !s.is_empty())
}

/// Per-request timeout (default 10s, configurable via `TAT_HTTP_TIMEOUT_MS`).
pub fn http_timeout() -> Duration {
    std::env::var("TAT_HTTP_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(10))
}

/// Resolved backend connection settings
#[derive(Clone)]
pub struct ApiConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim().trim_end_matches('/').to_string(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve settings from the environment, with explicit values taking
    /// precedence over environment variables.
    pub fn resolve(base_url: Option<String>, token: Option<String>) -> Result<Self, ApiError> {
        let base_url = base_url.or_else(api_base_url).ok_or_else(|| {
            ApiError::InvalidConfig("no backend URL (set TAT_API_BASE_URL or --base-url)".into())
        })?;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidConfig(format!(
                "backend URL must be http(s): {base_url}"
            )));
        }
        Ok(Self::new(base_url).with_token(token.or_else(api_token)).with_timeout(http_timeout()))
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
