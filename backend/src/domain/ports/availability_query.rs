//! Driving port for standalone availability checks.

use async_trait::async_trait;

use crate::domain::{AvailabilityCriteria, AvailabilityResult};

/// Availability check with retry and fallback already applied.
///
/// Implementations never fail: an unreachable authority yields an
/// `Unknown` result rather than an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvailabilityQuery: Send + Sync {
    async fn check(&self, criteria: &AvailabilityCriteria) -> AvailabilityResult;
}

/// Fixture query reporting every slot as available after one attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAvailabilityQuery;

#[async_trait]
impl AvailabilityQuery for FixtureAvailabilityQuery {
    async fn check(&self, _criteria: &AvailabilityCriteria) -> AvailabilityResult {
        AvailabilityResult::available(None, 1)
    }
}
