// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async driver for an [`EscalationTimer`].
//!
//! The driver owns the timer and is its only writer. It fetches the ticket
//! and both ladders, ticks on an interval, and publishes a fresh
//! [`TimerView`] on a watch channel after every change.
//!
//! Refreshes never block the tick loop: the fetch runs in a spawned task and
//! its result comes back over an mpsc channel. At most one is in flight.

use std::sync::Arc;
use std::time::Duration;

use tat_adapters::{ApiError, TicketApi};
use tat_core::{Clock, LadderResponse, Ticket, TicketId};
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::env;
use crate::error::DriverError;
use crate::timer::{EscalationTimer, TickOutcome, TimerPolicy, TimerSnapshot};
use crate::track::Track;
use crate::view::TimerView;

type RefreshResult = Result<Ticket, ApiError>;

/// Driver tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// How often the loop wakes to apply elapsed seconds
    pub tick: Duration,
    /// Heartbeat re-sync period; `None` disables it
    pub resync: Option<Duration>,
    pub policy: TimerPolicy,
}

impl DriverConfig {
    pub fn from_env() -> Self {
        Self {
            tick: env::tick_interval(),
            resync: env::resync_interval(),
            policy: TimerPolicy { freeze_golden_on_hold: env::golden_freeze_on_hold() },
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            resync: Some(Duration::from_secs(30)),
            policy: TimerPolicy::default(),
        }
    }
}

/// Why a refresh was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReason {
    /// A track reached zero
    Crossing,
    /// Periodic re-sync
    Heartbeat,
}

tat_core::simple_display! {
    RefreshReason {
        Crossing => "crossing",
        Heartbeat => "heartbeat",
    }
}

pub struct TimerDriver<A: TicketApi, C: Clock> {
    api: A,
    clock: C,
    ticket_id: TicketId,
    config: DriverConfig,
    timer: EscalationTimer,
    generation: u64,
    response: Arc<LadderResponse>,
    resolution: Arc<LadderResponse>,
    views: watch::Sender<Option<TimerView>>,
    refresh_tx: mpsc::Sender<RefreshResult>,
    refresh_rx: mpsc::Receiver<RefreshResult>,
    refresh_in_flight: bool,
    /// A crossing arrived while a refresh was in flight
    crossing_pending: bool,
    last_sync_ms: u64,
}

impl<A: TicketApi, C: Clock> TimerDriver<A, C> {
    pub fn new(api: A, clock: C, ticket_id: TicketId, config: DriverConfig) -> Self {
        let (views, _) = watch::channel(None);
        let (refresh_tx, refresh_rx) = mpsc::channel(4);
        Self {
            api,
            clock,
            ticket_id,
            config,
            timer: EscalationTimer::new(config.policy),
            generation: 0,
            response: Arc::new(LadderResponse::Absent),
            resolution: Arc::new(LadderResponse::Absent),
            views,
            refresh_tx,
            refresh_rx,
            refresh_in_flight: false,
            crossing_pending: false,
            last_sync_ms: 0,
        }
    }

    pub fn ticket_id(&self) -> &TicketId {
        &self.ticket_id
    }

    pub fn timer(&self) -> &EscalationTimer {
        &self.timer
    }

    pub fn view(&self) -> Option<TimerView> {
        self.timer.view()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<TimerView>> {
        self.views.subscribe()
    }

    pub fn refresh_in_flight(&self) -> bool {
        self.refresh_in_flight
    }

    /// Fetch the ticket and both ladders and initialize the timer.
    ///
    /// Only a failed ticket fetch is an error; a failed ladder fetch leaves
    /// that track on its fallback path.
    pub async fn load(&mut self) -> Result<(), DriverError> {
        let id = &self.ticket_id;
        let (ticket, response, resolution) = tokio::join!(
            self.api.ticket_details(id),
            self.api.response_tat_timings(id),
            self.api.resolution_tat_timings(id),
        );
        let ticket = ticket.map_err(|source| DriverError::Load { ticket: id.clone(), source })?;
        self.response = Arc::new(ladder_or_absent(id, Track::Response, response));
        self.resolution = Arc::new(ladder_or_absent(id, Track::Resolution, resolution));

        tracing::info!(
            ticket = %self.ticket_id,
            response = %self.response,
            resolution = %self.resolution,
            "ticket loaded"
        );
        self.install(ticket);
        Ok(())
    }

    /// Apply elapsed seconds, request a refresh when due, and publish.
    pub fn tick(&mut self) -> TickOutcome {
        let now_ms = self.clock.epoch_ms();
        let outcome = self.timer.catch_up(now_ms);
        if outcome.needs_refresh() {
            self.request_refresh(RefreshReason::Crossing);
        } else if self.resync_due(now_ms) {
            self.request_refresh(RefreshReason::Heartbeat);
        }
        self.publish();
        outcome
    }

    /// Start a background ticket fetch. Returns false when one is already
    /// in flight; a crossing is then queued and fetched once that one lands.
    pub fn request_refresh(&mut self, reason: RefreshReason) -> bool {
        if self.refresh_in_flight {
            if reason == RefreshReason::Crossing {
                self.crossing_pending = true;
            }
            tracing::debug!(ticket = %self.ticket_id, %reason, "refresh already in flight");
            return false;
        }
        self.refresh_in_flight = true;
        self.last_sync_ms = self.clock.epoch_ms();
        tracing::debug!(ticket = %self.ticket_id, %reason, "refreshing ticket");

        let api = self.api.clone();
        let id = self.ticket_id.clone();
        let tx = self.refresh_tx.clone();
        tokio::spawn(async move {
            let result = api.ticket_details(&id).await;
            let _ = tx.send(result).await;
        });
        true
    }

    /// Install a refresh result. Failures keep the last known state.
    ///
    /// Issues the queued crossing refresh, if any, afterwards.
    pub fn apply_refresh(&mut self, result: RefreshResult) -> bool {
        self.refresh_in_flight = false;
        let applied = match result {
            Ok(ticket) => {
                self.install(ticket);
                true
            }
            Err(e) => {
                tracing::warn!(
                    ticket = %self.ticket_id,
                    error = %e,
                    transient = e.is_transient(),
                    "ticket refresh failed, keeping last known state"
                );
                false
            }
        };
        if std::mem::take(&mut self.crossing_pending) {
            self.request_refresh(RefreshReason::Crossing);
        }
        applied
    }

    /// Wait for the in-flight refresh, if any, and apply it.
    pub async fn settle_refresh(&mut self) -> bool {
        if !self.refresh_in_flight {
            return false;
        }
        match self.refresh_rx.recv().await {
            Some(result) => self.apply_refresh(result),
            None => false,
        }
    }

    /// Tick until cancelled. Loads first if nothing is loaded yet.
    pub async fn run(mut self, cancel: CancellationToken) -> Result<(), DriverError> {
        if !self.timer.is_loaded() {
            self.load().await?;
        }

        let mut interval = tokio::time::interval(self.config.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        interval.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    self.tick();
                }
                Some(result) = self.refresh_rx.recv() => {
                    self.apply_refresh(result);
                    self.publish();
                }
            }
        }

        tracing::debug!(ticket = %self.ticket_id, "timer driver stopped");
        Ok(())
    }

    fn install(&mut self, ticket: Ticket) {
        self.generation += 1;
        let snapshot = TimerSnapshot {
            generation: self.generation,
            ticket: Arc::new(ticket),
            response: Arc::clone(&self.response),
            resolution: Arc::clone(&self.resolution),
        };
        let now_ms = self.clock.epoch_ms();
        self.timer.load(&snapshot, now_ms);
        self.last_sync_ms = now_ms;
        self.publish();
    }

    fn resync_due(&self, now_ms: u64) -> bool {
        self.config.resync.is_some_and(|period| {
            now_ms.saturating_sub(self.last_sync_ms) >= period.as_millis() as u64
        })
    }

    fn publish(&self) {
        self.views.send_replace(self.timer.view());
    }
}

fn ladder_or_absent(
    id: &TicketId,
    track: Track,
    result: Result<LadderResponse, ApiError>,
) -> LadderResponse {
    result.unwrap_or_else(|e| {
        tracing::warn!(
            ticket = %id,
            track = %track,
            error = %e,
            "failed to fetch escalation ladder, using fallback deadline"
        );
        LadderResponse::Absent
    })
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod tests;
