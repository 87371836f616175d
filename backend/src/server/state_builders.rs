//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use booking_backend::domain::ports::{AvailabilityQuery, BookingRepository};
use booking_backend::domain::{
    AvailabilityClient, BookingOrchestrator, BookingOrchestratorPorts, BookingQueryService,
    RandomReferenceGenerator,
};
use booking_backend::inbound::http::state::{HttpState, HttpStatePorts};
use booking_backend::outbound::availability::HttpAvailabilityAuthority;
use booking_backend::outbound::persistence::InMemoryBookingRepository;

use super::ServerConfig;

/// Build the handler state: one availability client, one repository and one
/// clock shared by the command and query sides.
///
/// # Errors
/// Returns [`std::io::Error`] when the reqwest client cannot be constructed.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let authority = HttpAvailabilityAuthority::new(
        config.availability_endpoint.clone(),
        config.availability_timeout,
    )
    .map_err(|err| std::io::Error::other(format!("availability client setup failed: {err}")))?;
    let availability: Arc<dyn AvailabilityQuery> =
        Arc::new(AvailabilityClient::new(Arc::new(authority), config.retry));
    let repository: Arc<dyn BookingRepository> = Arc::new(InMemoryBookingRepository::new());

    let orchestrator = BookingOrchestrator::new(
        BookingOrchestratorPorts::new(
            availability.clone(),
            Arc::new(RandomReferenceGenerator::new(clock.clone())),
            repository.clone(),
        ),
        clock.clone(),
        config.orchestrator,
    );

    Ok(web::Data::new(HttpState::new(
        HttpStatePorts {
            bookings: Arc::new(orchestrator),
            bookings_query: Arc::new(BookingQueryService::new(repository)),
            availability,
        },
        clock,
    )))
}
