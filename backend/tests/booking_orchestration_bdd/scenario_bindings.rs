//! Scenario bindings for booking orchestration BDD tests.

use super::*;
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/booking_orchestration.feature",
    name = "Available capacity confirms and stores the booking"
)]
fn available_capacity_confirms_and_stores_the_booking(world: BookingOrchestrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/booking_orchestration.feature",
    name = "No capacity rejects the booking without storing it"
)]
fn no_capacity_rejects_the_booking(world: BookingOrchestrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/booking_orchestration.feature",
    name = "Transient authority failures are retried"
)]
fn transient_authority_failures_are_retried(world: BookingOrchestrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/booking_orchestration.feature",
    name = "An unreachable authority leads to a conservative rejection"
)]
fn unreachable_authority_leads_to_conservative_rejection(world: BookingOrchestrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/booking_orchestration.feature",
    name = "Invalid routes are refused before any availability check"
)]
fn invalid_routes_are_refused_before_availability(world: BookingOrchestrationWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/booking_orchestration.feature",
    name = "Audited rejections are stored with a reference"
)]
fn audited_rejections_are_stored_with_a_reference(world: BookingOrchestrationWorld) {
    drop(world);
}
