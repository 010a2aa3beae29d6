// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tat_adapters::FakeTicketApi;
use tat_core::test_support::{sequence_secs, ticket_aged};
use tat_core::FakeClock;

const ID: &str = "T-9";

type TestDriver = TimerDriver<FakeTicketApi, FakeClock>;

fn setup(age_secs: u64, config: DriverConfig) -> (TestDriver, FakeTicketApi, FakeClock) {
    let clock = FakeClock::new();
    let ticket = ticket_aged(ID, clock.epoch_ms(), age_secs);
    let api = FakeTicketApi::new(ticket)
        .with_ladders(sequence_secs(&[300, 60]), sequence_secs(&[300, 600]));
    let driver = TimerDriver::new(api.clone(), clock.clone(), TicketId::new(ID), config);
    (driver, api, clock)
}

fn no_heartbeat() -> DriverConfig {
    DriverConfig { resync: None, ..DriverConfig::default() }
}

#[tokio::test]
async fn load_initializes_and_publishes() {
    let (mut driver, api, _clock) = setup(250, no_heartbeat());
    let views = driver.subscribe();
    assert!(views.borrow().is_none());

    driver.load().await.unwrap();

    let view = views.borrow().clone().unwrap();
    assert_eq!(view.generation, 1);
    assert_eq!(view.response.remaining_secs, 50);
    assert_eq!(view.resolution.remaining_secs, 50);
    let calls = api.calls();
    assert_eq!(
        (calls.ticket_details, calls.response_tat_timings, calls.resolution_tat_timings),
        (1, 1, 1)
    );
}

#[tokio::test]
async fn failed_ticket_fetch_is_a_load_error() {
    let (mut driver, api, _clock) = setup(0, no_heartbeat());
    api.fail_details(true);

    let err = driver.load().await.unwrap_err();

    assert!(matches!(err, DriverError::Load { ref ticket, .. } if *ticket == ID));
    assert!(driver.view().is_none());
}

#[tokio::test]
async fn failed_ladder_fetch_degrades_to_fallback() {
    let (mut driver, api, _clock) = setup(250, no_heartbeat());
    api.fail_timings(true);

    driver.load().await.unwrap();

    let view = driver.view().unwrap();
    assert_eq!(view.response.level, None);
    assert_eq!(view.response.remaining_secs, 0);
}

#[tokio::test]
async fn tick_applies_clock_seconds() {
    let (mut driver, _api, clock) = setup(0, no_heartbeat());
    driver.load().await.unwrap();
    let views = driver.subscribe();

    clock.advance_secs(3);
    let outcome = driver.tick();

    assert!(!outcome.needs_refresh());
    assert!(!driver.refresh_in_flight());
    assert_eq!(views.borrow().as_ref().unwrap().response.remaining_secs, 297);
}

#[tokio::test]
async fn crossing_triggers_a_single_refresh() {
    let (mut driver, api, clock) = setup(299, no_heartbeat());
    driver.load().await.unwrap();

    clock.advance_secs(1);
    let outcome = driver.tick();

    assert_eq!(outcome.crossed, vec![Track::Response, Track::Resolution]);
    assert!(driver.refresh_in_flight());
    assert!(driver.settle_refresh().await);
    assert_eq!(api.calls().ticket_details, 2);
    assert_eq!(driver.timer().generation(), Some(2));
}

#[tokio::test]
async fn refreshed_ticket_is_reloaded_from_scratch() {
    let (mut driver, api, clock) = setup(299, no_heartbeat());
    driver.load().await.unwrap();

    api.set_ticket(
        Ticket::builder()
            .id(ID)
            .issue_status("On Hold")
            .created_at_ms(clock.epoch_ms() - 299_000)
            .build(),
    );
    clock.advance_secs(1);
    driver.tick();
    driver.settle_refresh().await;

    let view = driver.view().unwrap();
    assert!(view.is_on_hold);
    assert_eq!(view.response.level, Some(2));
    assert_eq!(view.response.remaining_secs, 60);
}

#[tokio::test]
async fn only_one_refresh_in_flight() {
    let (mut driver, api, _clock) = setup(0, no_heartbeat());
    driver.load().await.unwrap();

    assert!(driver.request_refresh(RefreshReason::Heartbeat));
    assert!(!driver.request_refresh(RefreshReason::Heartbeat));
    driver.settle_refresh().await;
    assert!(!driver.settle_refresh().await);

    assert_eq!(api.calls().ticket_details, 2);
}

#[tokio::test]
async fn crossing_during_heartbeat_refreshes_again() {
    let clock = FakeClock::new();
    let api = FakeTicketApi::new(ticket_aged(ID, clock.epoch_ms(), 0))
        .with_ladders(sequence_secs(&[31, 60]), sequence_secs(&[600]));
    let mut driver =
        TimerDriver::new(api.clone(), clock.clone(), TicketId::new(ID), DriverConfig::default());
    driver.load().await.unwrap();

    clock.advance_secs(30);
    driver.tick();
    assert!(driver.refresh_in_flight());

    clock.advance_secs(1);
    let outcome = driver.tick();
    assert_eq!(outcome.crossed, vec![Track::Response]);

    assert!(driver.settle_refresh().await);
    assert!(driver.refresh_in_flight());
    assert!(driver.settle_refresh().await);
    assert!(!driver.refresh_in_flight());
    assert_eq!(api.calls().ticket_details, 3);
}

#[tokio::test]
async fn queued_crossing_survives_a_failed_refresh() {
    let (mut driver, api, _clock) = setup(0, no_heartbeat());
    driver.load().await.unwrap();
    api.fail_details(true);

    assert!(driver.request_refresh(RefreshReason::Heartbeat));
    assert!(!driver.request_refresh(RefreshReason::Crossing));
    assert!(!driver.settle_refresh().await);

    api.fail_details(false);
    assert!(driver.settle_refresh().await);
    assert_eq!(api.calls().ticket_details, 3);
}

#[tokio::test]
async fn failed_refresh_keeps_last_known_state() {
    let (mut driver, api, clock) = setup(299, no_heartbeat());
    driver.load().await.unwrap();
    api.fail_details(true);

    clock.advance_secs(1);
    driver.tick();
    assert!(!driver.settle_refresh().await);

    assert_eq!(driver.timer().generation(), Some(1));
    assert_eq!(driver.timer().remaining_secs(Track::Response), 60);
    assert!(!driver.refresh_in_flight());
}

#[tokio::test]
async fn heartbeat_resyncs_periodically() {
    let config = DriverConfig { resync: Some(Duration::from_secs(30)), ..DriverConfig::default() };
    let (mut driver, api, clock) = setup(0, config);
    driver.load().await.unwrap();

    clock.advance_secs(29);
    driver.tick();
    assert!(!driver.refresh_in_flight());

    clock.advance_secs(1);
    driver.tick();
    assert!(driver.refresh_in_flight());
    driver.settle_refresh().await;

    assert_eq!(api.calls().ticket_details, 2);
    assert_eq!(driver.timer().generation(), Some(2));
}

fn setup_with_status(status: &str, age_secs: u64) -> (TestDriver, FakeTicketApi, FakeClock) {
    let clock = FakeClock::new();
    let ticket = Ticket::builder()
        .id(ID)
        .issue_status(status)
        .created_at_ms(clock.epoch_ms() - age_secs * 1000)
        .build();
    let api = FakeTicketApi::new(ticket)
        .with_ladders(sequence_secs(&[300, 60]), sequence_secs(&[300, 600]));
    let driver =
        TimerDriver::new(api.clone(), clock.clone(), TicketId::new(ID), DriverConfig::default());
    (driver, api, clock)
}

async fn run_past_heartbeat(driver: &mut TestDriver, clock: &FakeClock) {
    for _ in 0..31 {
        clock.advance_secs(1);
        driver.tick();
    }
    assert!(driver.settle_refresh().await);
}

#[tokio::test]
async fn heartbeat_keeps_on_hold_countdowns_frozen() {
    let (mut driver, _api, clock) = setup_with_status("On Hold", 100);
    driver.load().await.unwrap();
    let before = driver.view().unwrap();

    run_past_heartbeat(&mut driver, &clock).await;

    let after = driver.view().unwrap();
    assert_eq!(driver.timer().generation(), Some(2));
    assert_eq!(before.response.remaining_secs, 200);
    assert_eq!(after.response.remaining_secs, 200);
    assert_eq!(after.resolution.remaining_secs, before.resolution.remaining_secs);
    assert_eq!(after.ageing, "00:00:02:11");
}

#[tokio::test]
async fn heartbeat_keeps_closed_ageing_frozen() {
    let (mut driver, _api, clock) = setup_with_status("Closed", 100);
    driver.load().await.unwrap();

    run_past_heartbeat(&mut driver, &clock).await;

    let view = driver.view().unwrap();
    assert_eq!(driver.timer().generation(), Some(2));
    assert_eq!(view.ageing, "00:00:01:40");
    assert_eq!(view.response.remaining_secs, 200);
}

#[tokio::test]
async fn disabled_heartbeat_never_resyncs() {
    let (mut driver, _api, clock) = setup(0, no_heartbeat());
    driver.load().await.unwrap();

    clock.advance_secs(120);
    driver.tick();

    assert!(!driver.refresh_in_flight());
}

#[tokio::test(start_paused = true)]
async fn run_stops_on_cancellation() {
    let (driver, api, _clock) = setup(0, no_heartbeat());
    let views = driver.subscribe();
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(driver.run(cancel.clone()));
    tokio::time::sleep(Duration::from_secs(5)).await;
    cancel.cancel();

    handle.await.unwrap().unwrap();
    assert_eq!(api.calls().ticket_details, 1);
    assert!(views.borrow().is_some());
}

#[tokio::test(start_paused = true)]
async fn run_reports_load_failure() {
    let (driver, api, _clock) = setup(0, no_heartbeat());
    api.fail_details(true);

    let result = driver.run(CancellationToken::new()).await;

    assert!(matches!(result, Err(DriverError::Load { .. })));
}

#[test]
fn refresh_reason_display() {
    assert_eq!(RefreshReason::Crossing.to_string(), "crossing");
    assert_eq!(RefreshReason::Heartbeat.to_string(), "heartbeat");
}
