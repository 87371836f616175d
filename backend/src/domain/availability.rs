//! Availability query criteria and tri-state results.
//!
//! `Unknown` is a decided state, not an error: it records that no usable
//! answer was obtained within the retry budget and that a conservative
//! default was applied. `fallback_used` lets callers tell a confirmed "no"
//! from a guessed one.

use super::booking::{BookingValidationError, LocationCode, SlotWindow};

/// Route and slot sent to the availability authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityCriteria {
    origin: LocationCode,
    destination: LocationCode,
    slot: SlotWindow,
}

impl AvailabilityCriteria {
    /// Build criteria for a standalone availability check.
    ///
    /// # Examples
    /// ```
    /// use booking_backend::domain::{AvailabilityCriteria, LocationCode, SlotWindow};
    /// use chrono::{Duration, Utc};
    ///
    /// let now = Utc::now();
    /// let slot = SlotWindow::new(now, now + Duration::days(7), now).expect("valid slot");
    /// let origin = LocationCode::parse("origin", "CN-SHA").expect("valid origin");
    /// let same = origin.clone();
    /// assert!(AvailabilityCriteria::new(origin, same, slot).is_err());
    /// ```
    pub fn new(
        origin: LocationCode,
        destination: LocationCode,
        slot: SlotWindow,
    ) -> Result<Self, BookingValidationError> {
        if origin == destination {
            return Err(BookingValidationError::SameOriginDestination { location: origin });
        }
        Ok(Self::from_validated(origin, destination, slot))
    }

    pub(crate) fn from_validated(
        origin: LocationCode,
        destination: LocationCode,
        slot: SlotWindow,
    ) -> Self {
        Self {
            origin,
            destination,
            slot,
        }
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
}

/// Tri-state availability verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AvailabilityVerdict {
    Available,
    Unavailable,
    /// No answer within the retry budget; fallback applied.
    Unknown,
}

impl AvailabilityVerdict {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
            Self::Unknown => "unknown",
        }
    }
}

/// Remaining capacity reported for a slot, in twenty-foot equivalent units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapacityHint {
    teu: u32,
}

impl CapacityHint {
    pub const fn new(teu: u32) -> Self {
        Self { teu }
    }

    /// Safe default used when the real capacity is unknown.
    pub const fn zero() -> Self {
        Self { teu: 0 }
    }

    pub const fn teu(self) -> u32 {
        self.teu
    }
}

/// Outcome of one availability check.
///
/// ## Invariants
/// - `fallback_used` is `true` exactly when the verdict is `Unknown`.
/// - `Unknown` always carries [`CapacityHint::zero`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityResult {
    verdict: AvailabilityVerdict,
    capacity_hint: Option<CapacityHint>,
    fallback_used: bool,
    attempts: u32,
}

impl AvailabilityResult {
    pub fn available(capacity_hint: Option<CapacityHint>, attempts: u32) -> Self {
        Self {
            verdict: AvailabilityVerdict::Available,
            capacity_hint,
            fallback_used: false,
            attempts,
        }
    }

    pub fn unavailable(capacity_hint: Option<CapacityHint>, attempts: u32) -> Self {
        Self {
            verdict: AvailabilityVerdict::Unavailable,
            capacity_hint,
            fallback_used: false,
            attempts,
        }
    }

    /// Fallback result after `attempts` calls failed to produce an answer.
    pub fn unknown(attempts: u32) -> Self {
        Self {
            verdict: AvailabilityVerdict::Unknown,
            capacity_hint: Some(CapacityHint::zero()),
            fallback_used: true,
            attempts,
        }
    }

    pub fn verdict(&self) -> AvailabilityVerdict {
        self.verdict
    }

    pub fn capacity_hint(&self) -> Option<CapacityHint> {
        self.capacity_hint
    }

    pub fn fallback_used(&self) -> bool {
        self.fallback_used
    }

    /// Number of authority calls made to reach this result.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}
