//! Shared test doubles and fixtures for unit and integration tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    AvailabilityResult, BackoffJitter, BookingRecord, BookingReference, BookingRequest,
    BookingRequestDraft, BookingStatus, RetrySleeper,
};

/// Fixed instant used as "now" by fixtures.
pub fn fixture_now() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).single() {
        Some(now) => now,
        None => panic!("fixture instant is valid"),
    }
}

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateSleeper;

#[async_trait]
impl RetrySleeper for ImmediateSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

/// Sleeper that records requested delays without waiting.
#[derive(Default)]
pub struct RecordingSleeper(pub Mutex<Vec<Duration>>);

impl RecordingSleeper {
    pub fn recorded(&self) -> Vec<Duration> {
        match self.0.lock() {
            Ok(entries) => entries.clone(),
            Err(_) => panic!("sleeper mutex"),
        }
    }
}

#[async_trait]
impl RetrySleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        let mut entries = match self.0.lock() {
            Ok(entries) => entries,
            Err(_) => panic!("sleeper mutex"),
        };
        entries.push(duration);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl BackoffJitter for NoJitter {
    fn jittered_delay(&self, base: Duration, _attempt: u32) -> Duration {
        base
    }
}

/// Valid Shanghai to Rotterdam draft with a seven day slot starting at `start`.
pub fn shanghai_rotterdam_draft(start: DateTime<Utc>) -> BookingRequestDraft {
    BookingRequestDraft {
        origin: "CN-SHA".to_owned(),
        destination: "NL-RTM".to_owned(),
        slot_start: start,
        slot_end: start + TimeDelta::days(7),
        commodity: "Consumer electronics".to_owned(),
        container_count: 2,
        gross_weight_kg: Some(18_500.0),
        requester_id: "forwarder-42".to_owned(),
    }
}

/// Record built from [`shanghai_rotterdam_draft`], for adapter tests.
pub fn confirmed_record(reference: &str) -> BookingRecord {
    let now = fixture_now();
    let request = match BookingRequest::validate(&shanghai_rotterdam_draft(now), now) {
        Ok(request) => request,
        Err(error) => panic!("fixture draft is valid: {error}"),
    };
    let reference = match BookingReference::parse(reference) {
        Ok(reference) => reference,
        Err(error) => panic!("fixture reference is valid: {error}"),
    };
    BookingRecord::from_request(
        reference,
        request,
        BookingStatus::Confirmed,
        AvailabilityResult::available(None, 1),
        now,
    )
}
