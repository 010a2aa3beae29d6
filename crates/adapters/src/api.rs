// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ticket management backend collaborator.

use async_trait::async_trait;
use tat_core::{LadderResponse, Ticket, TicketId};

use crate::error::ApiError;

/// Read access to the ticket management backend
#[async_trait]
pub trait TicketApi: Clone + Send + Sync + 'static {
    /// Full ticket record including status, timestamps, and the embedded
    /// next-escalation summaries.
    async fn ticket_details(&self, id: &TicketId) -> Result<Ticket, ApiError>;

    /// Response escalation ladder (or single summary) for a ticket.
    async fn response_tat_timings(&self, id: &TicketId) -> Result<LadderResponse, ApiError>;

    /// Resolution escalation ladder (or single summary) for a ticket.
    async fn resolution_tat_timings(&self, id: &TicketId) -> Result<LadderResponse, ApiError>;

    /// Task-creation form data; opaque to the TAT engine.
    async fn create_task_data(&self, id: &TicketId) -> Result<serde_json::Value, ApiError>;
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ApiError, TicketApi};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use tat_core::{LadderResponse, Ticket, TicketId};

    /// Number of calls made to each endpoint
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct ApiCalls {
        pub ticket_details: usize,
        pub response_tat_timings: usize,
        pub resolution_tat_timings: usize,
        pub create_task_data: usize,
    }

    struct FakeApiState {
        ticket: Ticket,
        response: LadderResponse,
        resolution: LadderResponse,
        fail_details: bool,
        fail_timings: bool,
        calls: ApiCalls,
    }

    /// Fake backend for testing; serves one scripted ticket
    #[derive(Clone)]
    pub struct FakeTicketApi {
        inner: Arc<Mutex<FakeApiState>>,
    }

    impl FakeTicketApi {
        pub fn new(ticket: Ticket) -> Self {
            Self {
                inner: Arc::new(Mutex::new(FakeApiState {
                    ticket,
                    response: LadderResponse::Absent,
                    resolution: LadderResponse::Absent,
                    fail_details: false,
                    fail_timings: false,
                    calls: ApiCalls::default(),
                })),
            }
        }

        pub fn with_ladders(self, response: LadderResponse, resolution: LadderResponse) -> Self {
            {
                let mut state = self.inner.lock();
                state.response = response;
                state.resolution = resolution;
            }
            self
        }

        /// Replace the ticket served by subsequent detail requests
        pub fn set_ticket(&self, ticket: Ticket) {
            self.inner.lock().ticket = ticket;
        }

        /// Make ticket detail requests fail
        pub fn fail_details(&self, fail: bool) {
            self.inner.lock().fail_details = fail;
        }

        /// Make both TAT timing requests fail
        pub fn fail_timings(&self, fail: bool) {
            self.inner.lock().fail_timings = fail;
        }

        pub fn calls(&self) -> ApiCalls {
            self.inner.lock().calls
        }
    }

    fn unknown(id: &TicketId) -> ApiError {
        ApiError::Status { status: 404, path: format!("ticket {id}"), body: String::new() }
    }

    #[async_trait]
    impl TicketApi for FakeTicketApi {
        async fn ticket_details(&self, id: &TicketId) -> Result<Ticket, ApiError> {
            let mut state = self.inner.lock();
            state.calls.ticket_details += 1;
            if state.fail_details {
                return Err(ApiError::Unavailable("scripted ticket details failure".into()));
            }
            if state.ticket.id != *id {
                return Err(unknown(id));
            }
            Ok(state.ticket.clone())
        }

        async fn response_tat_timings(&self, _id: &TicketId) -> Result<LadderResponse, ApiError> {
            let mut state = self.inner.lock();
            state.calls.response_tat_timings += 1;
            if state.fail_timings {
                return Err(ApiError::Unavailable("scripted TAT timings failure".into()));
            }
            Ok(state.response.clone())
        }

        async fn resolution_tat_timings(
            &self,
            _id: &TicketId,
        ) -> Result<LadderResponse, ApiError> {
            let mut state = self.inner.lock();
            state.calls.resolution_tat_timings += 1;
            if state.fail_timings {
                return Err(ApiError::Unavailable("scripted TAT timings failure".into()));
            }
            Ok(state.resolution.clone())
        }

        async fn create_task_data(&self, _id: &TicketId) -> Result<serde_json::Value, ApiError> {
            self.inner.lock().calls.create_task_data += 1;
            Ok(serde_json::json!({}))
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{ApiCalls, FakeTicketApi};

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
