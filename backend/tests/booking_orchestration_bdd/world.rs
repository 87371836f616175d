//! Scenario-world methods for booking orchestration BDD tests.

use std::sync::Arc;

use booking_backend::domain::ports::{BookingCommand, BookingRepository};
use booking_backend::domain::{
    AvailabilityClient, AvailabilityClientRuntime, AvailabilityRetryConfig, BookingOrchestrator,
    BookingOrchestratorConfig, BookingOrchestratorPorts, BookingOutcome, BookingRecord,
    BookingReference, RandomReferenceGenerator,
};
use booking_backend::outbound::persistence::InMemoryBookingRepository;
use booking_backend::test_support::{
    ImmediateSleeper, MutableClock, NoJitter, fixture_now, shanghai_rotterdam_draft,
};
use chrono::TimeDelta;
use tokio::runtime::Runtime;

use crate::{BookingOrchestrationWorld, RuntimeHandle, Scripted, ScriptedAuthority};

impl BookingOrchestrationWorld {
    /// Wire an orchestrator around a scripted authority for one scenario.
    pub fn setup(&self, script: Vec<Scripted>) {
        let runtime = Runtime::new().expect("create runtime");
        let clock = Arc::new(MutableClock::new(fixture_now()));
        let authority = Arc::new(ScriptedAuthority::new(script));
        let repository = Arc::new(InMemoryBookingRepository::new());

        let availability = AvailabilityClient::with_runtime(
            authority.clone(),
            AvailabilityClientRuntime {
                sleeper: Arc::new(ImmediateSleeper),
                jitter: Arc::new(NoJitter),
            },
            AvailabilityRetryConfig::default(),
        );
        let orchestrator = BookingOrchestrator::new(
            BookingOrchestratorPorts::new(
                Arc::new(availability),
                Arc::new(RandomReferenceGenerator::new(clock.clone())),
                repository.clone(),
            ),
            clock,
            BookingOrchestratorConfig {
                record_rejections: self.record_rejections.get().unwrap_or(false),
            },
        );

        self.runtime.set(RuntimeHandle(Arc::new(runtime)));
        self.orchestrator.set(Arc::new(orchestrator));
        self.authority.set(authority);
        self.repository.set(repository);
    }

    /// Submit the Shanghai to Rotterdam draft, optionally rerouted.
    pub fn submit(&self, destination: Option<&str>) {
        let runtime = self.runtime.get().expect("runtime should be set");
        let orchestrator = self.orchestrator.get().expect("orchestrator should be set");
        let mut draft = shanghai_rotterdam_draft(fixture_now() + TimeDelta::days(1));
        if let Some(destination) = destination {
            destination.clone_into(&mut draft.destination);
        }
        let result = runtime.0.block_on(orchestrator.create_booking(draft));
        self.last_result.set(result);
    }

    pub fn outcome(&self) -> BookingOutcome {
        self.last_result
            .get()
            .expect("a booking was submitted")
            .expect("booking call succeeded")
    }

    pub fn authority_calls(&self) -> u32 {
        self.authority
            .get()
            .expect("authority should be set")
            .call_count()
    }

    pub fn stored_count(&self) -> usize {
        let runtime = self.runtime.get().expect("runtime should be set");
        let repository = self.repository.get().expect("repository should be set");
        runtime.0.block_on(repository.len())
    }

    pub fn find_stored(&self, reference: &BookingReference) -> Option<BookingRecord> {
        let runtime = self.runtime.get().expect("runtime should be set");
        let repository = self.repository.get().expect("repository should be set");
        runtime
            .0
            .block_on(repository.find_by_reference(reference))
            .expect("repository lookup succeeds")
    }
}
