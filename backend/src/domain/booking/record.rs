//! Booking records and orchestration outcomes.

use chrono::{DateTime, Utc};

use super::{BookingRequest, CargoDescriptor, LocationCode, RequesterId, SlotWindow};
use crate::domain::availability::AvailabilityResult;
use crate::domain::reference::BookingReference;

/// Lifecycle status stored with a booking record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    Confirmed,
    Rejected,
}

impl BookingStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        }
    }
}

/// Why a validated booking was not confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// The authority answered that the slot has no capacity.
    Unavailable,
    /// No answer could be obtained; the booking was rejected conservatively.
    AvailabilityIndeterminate,
}

impl RejectionReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::AvailabilityIndeterminate => "availability_indeterminate",
        }
    }
}

/// Persisted booking entity, keyed by its reference.
///
/// Records are built only by the booking orchestrator and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    reference: BookingReference,
    origin: LocationCode,
    destination: LocationCode,
    slot: SlotWindow,
    cargo: CargoDescriptor,
    requester: RequesterId,
    status: BookingStatus,
    created_at: DateTime<Utc>,
    availability: AvailabilityResult,
}

impl BookingRecord {
    pub(crate) fn from_request(
        reference: BookingReference,
        request: BookingRequest,
        status: BookingStatus,
        availability: AvailabilityResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        let (origin, destination, slot, cargo, requester) = request.into_parts();
        Self {
            reference,
            origin,
            destination,
            slot,
            cargo,
            requester,
            status,
            created_at,
            availability,
        }
    }

    pub fn reference(&self) -> &BookingReference {
        &self.reference
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

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Availability result that produced the decision, kept for audit.
    pub fn availability(&self) -> AvailabilityResult {
        self.availability
    }
}

/// Non-error negative outcome of a booking attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRejection {
    reason: RejectionReason,
    availability: AvailabilityResult,
    reference: Option<BookingReference>,
}

impl BookingRejection {
    pub(crate) fn new(
        reason: RejectionReason,
        availability: AvailabilityResult,
        reference: Option<BookingReference>,
    ) -> Self {
        Self {
            reason,
            availability,
            reference,
        }
    }

    pub fn reason(&self) -> RejectionReason {
        self.reason
    }

    pub fn availability(&self) -> AvailabilityResult {
        self.availability
    }

    /// Reference of the audit record, present only when rejections are recorded.
    pub fn reference(&self) -> Option<&BookingReference> {
        self.reference.as_ref()
    }
}

/// Decided result of `create_booking`.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Confirmed(BookingRecord),
    Rejected(BookingRejection),
}

impl BookingOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    pub fn status(&self) -> BookingStatus {
        match self {
            Self::Confirmed(_) => BookingStatus::Confirmed,
            Self::Rejected(_) => BookingStatus::Rejected,
        }
    }
}
