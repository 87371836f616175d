//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects the booking, availability and health endpoints and
//! the request/response bodies they exchange. The document is exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::availability::{AvailabilityRequestBody, AvailabilityResponseBody};
use crate::inbound::http::bookings::{
    BookingRecordBody, BookingRejectionBody, CargoBody, CreateBookingRequestBody,
};
use crate::inbound::http::health::ProbeBody;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Booking backend API",
        description = "Shipment booking submission with availability checks and booking lookup."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::availability::check_availability,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateBookingRequestBody,
        BookingRecordBody,
        BookingRejectionBody,
        CargoBody,
        AvailabilityRequestBody,
        AvailabilityResponseBody,
        Error,
        ErrorCode,
        ProbeBody
    )),
    tags(
        (name = "bookings", description = "Booking submission and lookup"),
        (name = "availability", description = "Capacity checks against the availability authority"),
        (name = "health", description = "Readiness and liveness of the booking service")
    )
)]
pub struct ApiDoc;
