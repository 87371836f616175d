//! Availability HTTP handlers.
//!
//! ```text
//! POST /api/v1/availability
//! ```
//!
//! Exposes the retrying availability check on its own, so callers can probe
//! a lane before submitting a booking. The answer is never an error: an
//! authority that cannot be reached yields `verdict = "unknown"` with
//! `fallbackUsed = true`.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AvailabilityCriteria, AvailabilityResult, Error, LocationCode, SlotWindow};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_required_timestamp, require};

/// Request payload for an availability check.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequestBody {
    #[schema(example = "CN-SHA")]
    pub origin: Option<String>,
    #[schema(example = "NL-RTM")]
    pub destination: Option<String>,
    #[schema(format = "date-time")]
    pub slot_start: Option<String>,
    #[schema(format = "date-time")]
    pub slot_end: Option<String>,
}

/// Availability answer returned to callers and embedded in booking payloads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponseBody {
    /// One of `available`, `unavailable` or `unknown`.
    #[schema(example = "available")]
    pub verdict: String,
    pub capacity_teu: Option<u32>,
    /// True when no authoritative answer was obtained.
    pub fallback_used: bool,
    pub attempts: u32,
}

impl From<AvailabilityResult> for AvailabilityResponseBody {
    fn from(value: AvailabilityResult) -> Self {
        Self {
            verdict: value.verdict().as_str().to_owned(),
            capacity_teu: value.capacity_hint().map(|hint| hint.teu()),
            fallback_used: value.fallback_used(),
            attempts: value.attempts(),
        }
    }
}

fn parse_criteria(
    payload: AvailabilityRequestBody,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<AvailabilityCriteria, Error> {
    let origin_field = FieldName::new("origin");
    let destination_field = FieldName::new("destination");
    let origin = LocationCode::parse("origin", &require(payload.origin, origin_field)?)?;
    let destination =
        LocationCode::parse("destination", &require(payload.destination, destination_field)?)?;
    let start = parse_required_timestamp(payload.slot_start, FieldName::new("slotStart"))?;
    let end = parse_required_timestamp(payload.slot_end, FieldName::new("slotEnd"))?;
    let slot = SlotWindow::new(start, end, now)?;
    Ok(AvailabilityCriteria::new(origin, destination, slot)?)
}

/// Check capacity for a lane and slot.
#[utoipa::path(
    post,
    path = "/api/v1/availability",
    request_body = AvailabilityRequestBody,
    responses(
        (status = 200, description = "Availability answer, possibly a fallback", body = AvailabilityResponseBody),
        (status = 400, description = "Invalid request", body = Error)
    ),
    tags = ["availability"],
    operation_id = "checkAvailability"
)]
#[post("/availability")]
pub async fn check_availability(
    state: web::Data<HttpState>,
    payload: web::Json<AvailabilityRequestBody>,
) -> ApiResult<web::Json<AvailabilityResponseBody>> {
    let criteria = parse_criteria(payload.into_inner(), state.clock.utc())?;
    let result = state.availability.check(&criteria).await;
    Ok(web::Json(AvailabilityResponseBody::from(result)))
}
