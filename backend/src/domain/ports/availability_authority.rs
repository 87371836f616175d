//! Driven port for the external availability authority.
//!
//! The domain owns the request and answer shapes so the retry policy in
//! `AvailabilityClient` stays adapter-agnostic. One call is one attempt;
//! retries are never performed behind this port.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AvailabilityCriteria, CapacityHint};

/// Business verdict returned by the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorityVerdict {
    Available,
    Unavailable,
}

/// A well-formed answer from the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthorityAnswer {
    pub verdict: AuthorityVerdict,
    /// Remaining capacity when the authority reports it.
    pub capacity: Option<CapacityHint>,
}

define_port_error! {
    /// Errors surfaced while calling the availability authority.
    pub enum AvailabilityAuthorityError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "availability transport failed: {message}",
        /// The call exceeded its per-attempt timeout.
        Timeout { message: String } =>
            "availability request timed out: {message}",
        /// The authority failed with a server-side status.
        Upstream { status: u16, message: String } =>
            "availability authority failed with status {status}: {message}",
        /// The authority throttled the call.
        RateLimited { message: String } =>
            "availability authority rate limited request: {message}",
        /// The response violated the expected schema.
        Decode { message: String } =>
            "availability response decode failed: {message}",
        /// The authority refused the query with a client-side status.
        Rejected { status: u16, message: String } =>
            "availability authority rejected request with status {status}: {message}",
    }
}

impl AvailabilityAuthorityError {
    /// Return whether another attempt could plausibly succeed.
    ///
    /// Malformed answers and client-side refusals repeat identically, so
    /// they are final.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. }
                | Self::Timeout { .. }
                | Self::Upstream { .. }
                | Self::RateLimited { .. }
        )
    }
}

/// Port for asking the authority whether a slot has capacity.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityAuthority: Send + Sync {
    /// Issue one availability query.
    async fn query(
        &self,
        criteria: &AvailabilityCriteria,
    ) -> Result<AuthorityAnswer, AvailabilityAuthorityError>;
}

/// Fixture authority that reports every slot as available.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAvailabilityAuthority;

#[async_trait]
impl AvailabilityAuthority for FixtureAvailabilityAuthority {
    async fn query(
        &self,
        _criteria: &AvailabilityCriteria,
    ) -> Result<AuthorityAnswer, AvailabilityAuthorityError> {
        Ok(AuthorityAnswer {
            verdict: AuthorityVerdict::Available,
            capacity: None,
        })
    }
}
