//! Booking HTTP handlers.
//!
//! ```text
//! POST /api/v1/bookings
//! GET  /api/v1/bookings/{reference}
//! ```
//!
//! A confirmed booking answers `201 Created` with the stored record. A
//! rejection is a successful business outcome and answers `200 OK` with
//! `status = "rejected"`; failures use the shared error payload.

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    BookingOutcome, BookingRecord, BookingRejection, BookingRequestDraft, Error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::availability::AvailabilityResponseBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_required_timestamp, require};

/// Request payload for creating a booking.
///
/// Every field is optional at the wire level so a missing one is reported as
/// `invalid_request` with the field name rather than a decoder error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequestBody {
    #[schema(example = "CN-SHA")]
    pub origin: Option<String>,
    #[schema(example = "NL-RTM")]
    pub destination: Option<String>,
    #[schema(format = "date-time")]
    pub slot_start: Option<String>,
    #[schema(format = "date-time")]
    pub slot_end: Option<String>,
    #[schema(example = "Consumer electronics")]
    pub commodity: Option<String>,
    #[schema(minimum = 1)]
    pub container_count: Option<u32>,
    pub gross_weight_kg: Option<f64>,
    #[schema(example = "forwarder-42")]
    pub requester_id: Option<String>,
}

/// Cargo section of a stored booking.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CargoBody {
    pub commodity: String,
    pub container_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gross_weight_kg: Option<f64>,
}

/// Stored booking returned on confirmation and by lookup.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecordBody {
    #[schema(example = "BK-01JNB7Q2M-1ZK8WQ5T0H1RC")]
    pub reference: String,
    /// `confirmed` or, for audited rejections, `rejected`.
    pub status: String,
    pub origin: String,
    pub destination: String,
    #[schema(format = "date-time")]
    pub slot_start: String,
    #[schema(format = "date-time")]
    pub slot_end: String,
    pub cargo: CargoBody,
    pub requester_id: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    pub availability: AvailabilityResponseBody,
}

/// Rejected booking outcome.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingRejectionBody {
    /// Always `rejected`.
    pub status: String,
    /// `unavailable` or `availability_indeterminate`.
    pub reason: String,
    pub availability: AvailabilityResponseBody,
    /// Present only when rejections are recorded for audit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl From<&BookingRecord> for BookingRecordBody {
    fn from(record: &BookingRecord) -> Self {
        Self {
            reference: record.reference().to_string(),
            status: record.status().as_str().to_owned(),
            origin: record.origin().to_string(),
            destination: record.destination().to_string(),
            slot_start: timestamp(record.slot().start()),
            slot_end: timestamp(record.slot().end()),
            cargo: CargoBody {
                commodity: record.cargo().commodity().to_owned(),
                container_count: record.cargo().container_count(),
                gross_weight_kg: record.cargo().gross_weight_kg(),
            },
            requester_id: record.requester().as_str().to_owned(),
            created_at: timestamp(record.created_at()),
            availability: record.availability().into(),
        }
    }
}

impl From<&BookingRejection> for BookingRejectionBody {
    fn from(rejection: &BookingRejection) -> Self {
        Self {
            status: "rejected".to_owned(),
            reason: rejection.reason().as_str().to_owned(),
            availability: rejection.availability().into(),
            reference: rejection.reference().map(ToString::to_string),
        }
    }
}

fn parse_booking_draft(payload: CreateBookingRequestBody) -> Result<BookingRequestDraft, Error> {
    Ok(BookingRequestDraft {
        origin: require(payload.origin, FieldName::new("origin"))?,
        destination: require(payload.destination, FieldName::new("destination"))?,
        slot_start: parse_required_timestamp(payload.slot_start, FieldName::new("slotStart"))?,
        slot_end: parse_required_timestamp(payload.slot_end, FieldName::new("slotEnd"))?,
        commodity: require(payload.commodity, FieldName::new("commodity"))?,
        container_count: require(payload.container_count, FieldName::new("containerCount"))?,
        gross_weight_kg: payload.gross_weight_kg,
        requester_id: require(payload.requester_id, FieldName::new("requesterId"))?,
    })
}

/// Submit a booking request.
///
/// # Examples
/// ```no_run
/// use actix_web::web;
/// use booking_backend::inbound::http::bookings::{CreateBookingRequestBody, create_booking};
/// use booking_backend::inbound::http::{ApiResult, state::HttpState};
///
/// async fn call_handler(state: web::Data<HttpState>) -> ApiResult<actix_web::HttpResponse> {
///     let payload = web::Json(CreateBookingRequestBody {
///         origin: Some("CN-SHA".to_owned()),
///         destination: Some("NL-RTM".to_owned()),
///         slot_start: Some("2026-03-03T09:00:00Z".to_owned()),
///         slot_end: Some("2026-03-10T09:00:00Z".to_owned()),
///         commodity: Some("Consumer electronics".to_owned()),
///         container_count: Some(2),
///         gross_weight_kg: None,
///         requester_id: Some("forwarder-42".to_owned()),
///     });
///     create_booking(state, payload).await
/// }
/// ```
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequestBody,
    responses(
        (status = 201, description = "Booking confirmed and stored", body = BookingRecordBody),
        (status = 200, description = "Booking rejected", body = BookingRejectionBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Persistence or reference failure", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    payload: web::Json<CreateBookingRequestBody>,
) -> ApiResult<HttpResponse> {
    let draft = parse_booking_draft(payload.into_inner())?;
    let outcome = state.bookings.create_booking(draft).await?;

    Ok(match outcome {
        BookingOutcome::Confirmed(record) => {
            HttpResponse::Created().json(BookingRecordBody::from(&record))
        }
        BookingOutcome::Rejected(rejection) => {
            HttpResponse::Ok().json(BookingRejectionBody::from(&rejection))
        }
    })
}

/// Look up a stored booking by reference.
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{reference}",
    params(("reference" = String, Path, description = "Booking reference")),
    responses(
        (status = 200, description = "Stored booking", body = BookingRecordBody),
        (status = 400, description = "Malformed reference", body = Error),
        (status = 404, description = "Unknown reference", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/bookings/{reference}")]
pub async fn get_booking(
    state: web::Data<HttpState>,
    reference: web::Path<String>,
) -> ApiResult<web::Json<BookingRecordBody>> {
    let record = state
        .bookings_query
        .find_by_reference(reference.as_str())
        .await?;
    Ok(web::Json(BookingRecordBody::from(&record)))
}

#[cfg(test)]
#[path = "bookings_tests.rs"]
mod tests;
