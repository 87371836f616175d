//! Retry budget for availability checks.

use std::time::Duration;

/// Retry configuration for one availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityRetryConfig {
    /// Maximum authority calls per check, including the first. Zero is
    /// treated as one.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_backoff: Duration,
    /// Cap on the exponential base delay.
    pub max_backoff: Duration,
    /// Ceiling on the whole check, backoff included.
    pub total_timeout: Duration,
}

impl Default for AvailabilityRetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(2),
            total_timeout: Duration::from_secs(10),
        }
    }
}

impl AvailabilityRetryConfig {
    pub(super) fn effective_max_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Exponential base delay after `attempt` failed: `initial * 2^(attempt-1)`,
    /// capped at `max_backoff`.
    pub(super) fn retry_base_delay(&self, attempt: u32) -> Duration {
        let exponent = 2_u32.saturating_pow(attempt.saturating_sub(1));
        let base_ms = u64::try_from(self.initial_backoff.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max_backoff.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(base_ms.saturating_mul(u64::from(exponent)).min(max_ms))
    }
}
