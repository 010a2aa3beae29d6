// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! tat-adapters: ticket management backend access

pub mod api;
pub mod env;
pub mod error;
pub mod http;

pub use api::TicketApi;
#[cfg(any(test, feature = "test-support"))]
pub use api::{ApiCalls, FakeTicketApi};
pub use env::ApiConfig;
pub use error::ApiError;
pub use http::HttpTicketApi;
