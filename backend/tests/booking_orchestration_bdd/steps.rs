//! Step definitions for booking orchestration BDD tests.

use super::*;
use booking_backend::domain::{AvailabilityVerdict, BookingStatus};
use rstest_bdd_macros::{given, then, when};

#[given("rejections are recorded for audit")]
fn rejections_are_recorded_for_audit(world: &BookingOrchestrationWorld) {
    world.record_rejections.set(true);
}

#[given("an availability authority that answers available")]
fn an_availability_authority_that_answers_available(world: &BookingOrchestrationWorld) {
    world.setup(vec![answer(AuthorityVerdict::Available)]);
}

#[given("an availability authority that answers unavailable")]
fn an_availability_authority_that_answers_unavailable(world: &BookingOrchestrationWorld) {
    world.setup(vec![answer(AuthorityVerdict::Unavailable)]);
}

#[given("an availability authority that fails {failures} times before answering available")]
fn an_availability_authority_that_fails_before_answering(
    world: &BookingOrchestrationWorld,
    failures: usize,
) {
    let mut script: Vec<Scripted> = (0..failures)
        .map(|_| Err(AvailabilityAuthorityError::upstream(503_u16, "status 503")))
        .collect();
    script.push(answer(AuthorityVerdict::Available));
    world.setup(script);
}

#[given("an availability authority that never answers")]
fn an_availability_authority_that_never_answers(world: &BookingOrchestrationWorld) {
    world.setup(Vec::new());
}

#[when("a valid Shanghai to Rotterdam booking is submitted")]
fn a_valid_booking_is_submitted(world: &BookingOrchestrationWorld) {
    world.submit(None);
}

#[when("a booking from Shanghai to Shanghai is submitted")]
fn a_booking_from_shanghai_to_shanghai_is_submitted(world: &BookingOrchestrationWorld) {
    world.submit(Some("cnsha"));
}

#[then("the booking is confirmed")]
fn the_booking_is_confirmed(world: &BookingOrchestrationWorld) {
    let outcome = world.outcome();
    assert!(outcome.is_confirmed(), "expected confirmation, got {outcome:?}");
}

#[then("the stored booking can be found by its reference")]
fn the_stored_booking_can_be_found(world: &BookingOrchestrationWorld) {
    let BookingOutcome::Confirmed(record) = world.outcome() else {
        panic!("expected a confirmed booking");
    };
    let stored = world
        .find_stored(record.reference())
        .expect("confirmed booking is stored");
    assert_eq!(stored, record);
    assert_eq!(stored.status(), BookingStatus::Confirmed);
}

#[then("the booking is rejected with reason {reason}")]
fn the_booking_is_rejected_with_reason(world: &BookingOrchestrationWorld, reason: String) {
    let BookingOutcome::Rejected(rejection) = world.outcome() else {
        panic!("expected a rejected booking");
    };
    assert_eq!(rejection.reason().as_str(), reason);
}

#[then("the availability fallback was used")]
fn the_availability_fallback_was_used(world: &BookingOrchestrationWorld) {
    let BookingOutcome::Rejected(rejection) = world.outcome() else {
        panic!("expected a rejected booking");
    };
    let availability = rejection.availability();
    assert!(availability.fallback_used());
    assert_eq!(availability.verdict(), AvailabilityVerdict::Unknown);
}

#[then("the authority was called {calls} times")]
fn the_authority_was_called(world: &BookingOrchestrationWorld, calls: u32) {
    assert_eq!(world.authority_calls(), calls);
}

#[then("no booking is stored")]
fn no_booking_is_stored(world: &BookingOrchestrationWorld) {
    assert_eq!(world.stored_count(), 0);
}

#[then("the request fails with code {code}")]
fn the_request_fails_with_code(world: &BookingOrchestrationWorld, code: String) {
    let error = world
        .last_result
        .get()
        .expect("a booking was submitted")
        .expect_err("booking call failed");
    assert_eq!(error.code().as_str(), code);
}

#[then("the rejection carries a reference to a stored rejected booking")]
fn the_rejection_carries_a_stored_reference(world: &BookingOrchestrationWorld) {
    let BookingOutcome::Rejected(rejection) = world.outcome() else {
        panic!("expected a rejected booking");
    };
    let reference = rejection.reference().expect("audited rejection has a reference");
    let stored = world
        .find_stored(reference)
        .expect("audited rejection is stored");
    assert_eq!(stored.status(), BookingStatus::Rejected);
    assert!(stored.availability().fallback_used());
}
