//! Booking request and booking record domain types.
//!
//! A [`BookingRequest`] is the validated, immutable form of an incoming
//! booking attempt. It lives only for one orchestration run. A
//! [`BookingRecord`] is the write-once entity handed to the repository once a
//! decision has been reached.

use std::fmt;

use serde_json::json;

use crate::domain::Error;

mod record;
mod request;

pub use record::{BookingOutcome, BookingRecord, BookingRejection, BookingStatus, RejectionReason};
pub use request::{
    BookingRequest, BookingRequestDraft, CargoDescriptor, LocationCode, RequesterId, SlotWindow,
};

/// Longest slot window accepted for a single booking.
pub const MAX_SLOT_DAYS: i64 = 90;
/// Maximum commodity description length in characters.
pub const MAX_COMMODITY_CHARS: usize = 200;
/// Maximum requester identifier length in characters.
pub const MAX_REQUESTER_CHARS: usize = 128;

/// Validation errors raised while building booking value objects.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingValidationError {
    InvalidLocation { field: &'static str, value: String },
    SameOriginDestination { location: LocationCode },
    SlotNotOrdered,
    SlotInPast,
    SlotTooLong,
    BlankCommodity,
    CommodityTooLong { length: usize },
    NoContainers,
    InvalidWeight { value: f64 },
    BlankRequester,
    RequesterTooLong { length: usize },
    InvalidReference { value: String },
}

impl BookingValidationError {
    /// Request field the failure refers to, in wire (camelCase) form.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidLocation { field, .. } => field,
            Self::SameOriginDestination { .. } => "destination",
            Self::SlotNotOrdered | Self::SlotInPast | Self::SlotTooLong => "slot",
            Self::BlankCommodity | Self::CommodityTooLong { .. } => "cargo.commodity",
            Self::NoContainers => "cargo.containerCount",
            Self::InvalidWeight { .. } => "cargo.grossWeightKg",
            Self::BlankRequester | Self::RequesterTooLong { .. } => "requesterId",
            Self::InvalidReference { .. } => "reference",
        }
    }

    /// Machine-readable reason published in error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidLocation { .. } => "invalid_location",
            Self::SameOriginDestination { .. } => "same_origin_destination",
            Self::SlotNotOrdered => "slot_not_ordered",
            Self::SlotInPast => "slot_in_past",
            Self::SlotTooLong => "slot_too_long",
            Self::BlankCommodity | Self::BlankRequester => "blank",
            Self::CommodityTooLong { .. } | Self::RequesterTooLong { .. } => "too_long",
            Self::NoContainers | Self::InvalidWeight { .. } => "out_of_range",
            Self::InvalidReference { .. } => "invalid_reference",
        }
    }
}

impl fmt::Display for BookingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLocation { field, value } => write!(
                f,
                "{field} must be a location code like CN-SHA (got {value:?})"
            ),
            Self::SameOriginDestination { location } => {
                write!(f, "origin and destination must differ (both {location})")
            }
            Self::SlotNotOrdered => write!(f, "slot start must be before slot end"),
            Self::SlotInPast => write!(f, "slot must not start in the past"),
            Self::SlotTooLong => {
                write!(f, "slot must not span more than {MAX_SLOT_DAYS} days")
            }
            Self::BlankCommodity => write!(f, "cargo commodity must not be blank"),
            Self::CommodityTooLong { length } => write!(
                f,
                "cargo commodity must be at most {MAX_COMMODITY_CHARS} characters (got {length})"
            ),
            Self::NoContainers => write!(f, "cargo must include at least one container"),
            Self::InvalidWeight { value } => {
                write!(f, "cargo gross weight must be finite and positive (got {value})")
            }
            Self::BlankRequester => write!(f, "requester id must not be blank"),
            Self::RequesterTooLong { length } => write!(
                f,
                "requester id must be at most {MAX_REQUESTER_CHARS} characters (got {length})"
            ),
            Self::InvalidReference { value } => {
                write!(f, "booking reference is malformed (got {value:?})")
            }
        }
    }
}

impl std::error::Error for BookingValidationError {}

impl From<BookingValidationError> for Error {
    fn from(value: BookingValidationError) -> Self {
        Error::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}
