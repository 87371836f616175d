//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{AvailabilityQuery, BookingCommand, BookingQuery};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
    pub availability: Arc<dyn AvailabilityQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub bookings: Arc<dyn BookingCommand>,
    pub bookings_query: Arc<dyn BookingQuery>,
    pub availability: Arc<dyn AvailabilityQuery>,
    /// Source of "now" for slot checks made directly by the adapter.
    pub clock: Arc<dyn Clock>,
}

impl HttpState {
    /// Construct state from the port bundle and the shared clock.
    pub fn new(ports: HttpStatePorts, clock: Arc<dyn Clock>) -> Self {
        let HttpStatePorts {
            bookings,
            bookings_query,
            availability,
        } = ports;
        Self {
            bookings,
            bookings_query,
            availability,
            clock,
        }
    }
}
