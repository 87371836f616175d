//! Wire DTOs for the availability authority.
//!
//! Requests are encoded from domain criteria; responses decode into these
//! DTOs first, then map into an `AuthorityAnswer` in one pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{AuthorityAnswer, AuthorityVerdict};
use crate::domain::{AvailabilityCriteria, CapacityHint};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AvailabilityRequestDto<'a> {
    pub(super) origin: &'a str,
    pub(super) destination: &'a str,
    pub(super) slot_start: DateTime<Utc>,
    pub(super) slot_end: DateTime<Utc>,
}

impl<'a> From<&'a AvailabilityCriteria> for AvailabilityRequestDto<'a> {
    fn from(criteria: &'a AvailabilityCriteria) -> Self {
        Self {
            origin: criteria.origin().as_str(),
            destination: criteria.destination().as_str(),
            slot_start: criteria.slot().start(),
            slot_end: criteria.slot().end(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum VerdictDto {
    Available,
    Unavailable,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AvailabilityResponseDto {
    pub(super) verdict: VerdictDto,
    #[serde(default)]
    pub(super) capacity_teu: Option<u32>,
}

impl From<AvailabilityResponseDto> for AuthorityAnswer {
    fn from(value: AvailabilityResponseDto) -> Self {
        let verdict = match value.verdict {
            VerdictDto::Available => AuthorityVerdict::Available,
            VerdictDto::Unavailable => AuthorityVerdict::Unavailable,
        };
        Self {
            verdict,
            capacity: value.capacity_teu.map(CapacityHint::new),
        }
    }
}
