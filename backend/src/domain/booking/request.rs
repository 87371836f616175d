//! Validated booking request value objects.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use super::{BookingValidationError, MAX_COMMODITY_CHARS, MAX_REQUESTER_CHARS, MAX_SLOT_DAYS};
use crate::domain::availability::AvailabilityCriteria;

/// Port or terminal location in canonical `CC-LLL` form.
///
/// # Examples
/// ```
/// use booking_backend::domain::LocationCode;
///
/// let code = LocationCode::parse("origin", " cnsha ").expect("valid code");
/// assert_eq!(code.as_str(), "CN-SHA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationCode(String);

impl LocationCode {
    /// Parse `CCLLL` or `CC-LLL`, case-insensitively.
    ///
    /// `field` names the request field in validation errors.
    pub fn parse(field: &'static str, raw: &str) -> Result<Self, BookingValidationError> {
        let invalid = || BookingValidationError::InvalidLocation {
            field,
            value: raw.to_owned(),
        };
        let upper = raw.trim().to_ascii_uppercase();
        let compact: String = match upper.len() {
            5 => upper,
            6 if upper.as_bytes()[2] == b'-' => upper.replacen('-', "", 1),
            _ => return Err(invalid()),
        };
        let bytes = compact.as_bytes();
        if bytes.len() != 5
            || !bytes[..2].iter().all(u8::is_ascii_uppercase)
            || !bytes[2..].iter().all(u8::is_ascii_alphanumeric)
        {
            return Err(invalid());
        }
        Ok(Self(format!("{}-{}", &compact[..2], &compact[2..])))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Requested shipment slot as a half-open UTC interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl SlotWindow {
    /// Build a slot that is ordered, not in the past relative to `now`, and
    /// no longer than [`MAX_SLOT_DAYS`].
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Self, BookingValidationError> {
        if start >= end {
            return Err(BookingValidationError::SlotNotOrdered);
        }
        if start < now {
            return Err(BookingValidationError::SlotInPast);
        }
        if end - start > Duration::days(MAX_SLOT_DAYS) {
            return Err(BookingValidationError::SlotTooLong);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// What is being shipped.
#[derive(Debug, Clone, PartialEq)]
pub struct CargoDescriptor {
    commodity: String,
    container_count: u32,
    gross_weight_kg: Option<f64>,
}

impl CargoDescriptor {
    pub fn new(
        commodity: &str,
        container_count: u32,
        gross_weight_kg: Option<f64>,
    ) -> Result<Self, BookingValidationError> {
        let commodity = commodity.trim();
        if commodity.is_empty() {
            return Err(BookingValidationError::BlankCommodity);
        }
        let length = commodity.chars().count();
        if length > MAX_COMMODITY_CHARS {
            return Err(BookingValidationError::CommodityTooLong { length });
        }
        if container_count == 0 {
            return Err(BookingValidationError::NoContainers);
        }
        if let Some(value) = gross_weight_kg.filter(|weight| !weight.is_finite() || *weight <= 0.0) {
            return Err(BookingValidationError::InvalidWeight { value });
        }
        Ok(Self {
            commodity: commodity.to_owned(),
            container_count,
            gross_weight_kg,
        })
    }

    pub fn commodity(&self) -> &str {
        &self.commodity
    }

    pub fn container_count(&self) -> u32 {
        self.container_count
    }

    pub fn gross_weight_kg(&self) -> Option<f64> {
        self.gross_weight_kg
    }
}

/// Identifier of the party requesting the booking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequesterId(String);

impl RequesterId {
    pub fn new(raw: &str) -> Result<Self, BookingValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BookingValidationError::BlankRequester);
        }
        let length = trimmed.chars().count();
        if length > MAX_REQUESTER_CHARS {
            return Err(BookingValidationError::RequesterTooLong { length });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unvalidated booking input as received by the driving port.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequestDraft {
    pub origin: String,
    pub destination: String,
    pub slot_start: DateTime<Utc>,
    pub slot_end: DateTime<Utc>,
    pub commodity: String,
    pub container_count: u32,
    pub gross_weight_kg: Option<f64>,
    pub requester_id: String,
}

/// Validated booking request.
///
/// ## Invariants
/// - `origin != destination`.
/// - `slot` is ordered and did not start before the validation instant.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    origin: LocationCode,
    destination: LocationCode,
    slot: SlotWindow,
    cargo: CargoDescriptor,
    requester: RequesterId,
}

impl BookingRequest {
    /// Validate a draft against the supplied clock reading.
    ///
    /// Checks run in field order and stop at the first failure.
    pub fn validate(
        draft: &BookingRequestDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, BookingValidationError> {
        let origin = LocationCode::parse("origin", &draft.origin)?;
        let destination = LocationCode::parse("destination", &draft.destination)?;
        if origin == destination {
            return Err(BookingValidationError::SameOriginDestination { location: origin });
        }
        let slot = SlotWindow::new(draft.slot_start, draft.slot_end, now)?;
        let cargo = CargoDescriptor::new(
            &draft.commodity,
            draft.container_count,
            draft.gross_weight_kg,
        )?;
        let requester = RequesterId::new(&draft.requester_id)?;

        Ok(Self {
            origin,
            destination,
            slot,
            cargo,
            requester,
        })
    }

    pub fn origin(&self) -> &LocationCode {
        &self.origin
    }

    pub fn destination(&self) -> &LocationCode {
        &self.destination
    }

    pub fn slot(&self) -> SlotWindow {
        self.slot
    }

    pub fn cargo(&self) -> &CargoDescriptor {
        &self.cargo
    }

    pub fn requester(&self) -> &RequesterId {
        &self.requester
    }

    pub(crate) fn into_parts(
        self,
    ) -> (LocationCode, LocationCode, SlotWindow, CargoDescriptor, RequesterId) {
        (
            self.origin,
            self.destination,
            self.slot,
            self.cargo,
            self.requester,
        )
    }

    /// Availability query derived from the route and slot.
    pub fn criteria(&self) -> AvailabilityCriteria {
        AvailabilityCriteria::from_validated(
            self.origin.clone(),
            self.destination.clone(),
            self.slot,
        )
    }
}
