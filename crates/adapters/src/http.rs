// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP implementation of [`TicketApi`] over the ticket management REST API.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tat_core::{LadderResponse, Ticket, TicketId};

use crate::api::TicketApi;
use crate::env::ApiConfig;
use crate::error::ApiError;

/// Longest response body excerpt carried in a status error
const BODY_EXCERPT: usize = 200;

/// reqwest-backed client for the ticket management backend
#[derive(Clone, Debug)]
pub struct HttpTicketApi {
    client: Client,
    config: ApiConfig,
}

impl HttpTicketApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("tat/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
        let mut request =
            self.client.get(self.url(path)).query(query).header(header::ACCEPT, "application/json");
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(path, "GET");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(path, status = status.as_u16(), "backend request failed");
            return Err(status_error(status, path, &body));
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode { path: path.to_string(), message: e.to_string() })
    }
}

fn status_error(status: StatusCode, path: &str, body: &str) -> ApiError {
    let body: String = body.trim().chars().take(BODY_EXCERPT).collect();
    ApiError::Status { status: status.as_u16(), path: path.to_string(), body }
}

/// Ticket details arrive either bare or wrapped in a `complaint` envelope.
pub(crate) fn decode_ticket(path: &str, value: Value) -> Result<Ticket, ApiError> {
    let value = match value {
        Value::Object(mut map) if map.get("complaint").is_some_and(Value::is_object) => {
            map.remove("complaint").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| ApiError::Decode { path: path.to_string(), message: e.to_string() })
}

#[async_trait]
impl TicketApi for HttpTicketApi {
    async fn ticket_details(&self, id: &TicketId) -> Result<Ticket, ApiError> {
        let path = format!("/pms/admin/complaints/{id}.json");
        let value = self.get_json(&path, &[]).await?;
        decode_ticket(&path, value)
    }

    async fn response_tat_timings(&self, id: &TicketId) -> Result<LadderResponse, ApiError> {
        let value = self.get_json("/response_tat_timings", &[("id", id.as_str())]).await?;
        Ok(LadderResponse::from_value(value))
    }

    async fn resolution_tat_timings(&self, id: &TicketId) -> Result<LadderResponse, ApiError> {
        let value = self.get_json("/resolution_tat_timings", &[("id", id.as_str())]).await?;
        Ok(LadderResponse::from_value(value))
    }

    async fn create_task_data(&self, id: &TicketId) -> Result<Value, ApiError> {
        self.get_json(&format!("/pms/admin/complaints/{id}/create_task.json"), &[]).await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
