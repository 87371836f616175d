//! Availability client owning retry and fallback policy.
//!
//! One check issues up to `max_attempts` authority calls. Transient
//! failures back off exponentially with jitter. The whole sequence is bounded
//! by a total-time ceiling. When no answer is obtained, whether from
//! exhaustion, a final error or the ceiling, the check resolves to
//! [`AvailabilityResult::unknown`] instead of failing the caller.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    AuthorityAnswer, AuthorityVerdict, AvailabilityAuthority, AvailabilityAuthorityError,
    AvailabilityQuery,
};
use crate::domain::{AvailabilityCriteria, AvailabilityResult};

mod attempt_error;
mod policy;
mod runtime;

use attempt_error::AttemptError;
pub use policy::AvailabilityRetryConfig;
pub use runtime::{AttemptJitter, AvailabilityClientRuntime, TokioSleeper};

/// Async sleeping abstraction for retry backoff.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Retry backoff jitter abstraction.
pub trait BackoffJitter: Send + Sync {
    /// Return the delay to wait before attempt `attempt + 1`, given the
    /// exponential base delay.
    ///
    /// ```rust
    /// use booking_backend::domain::BackoffJitter;
    /// use std::time::Duration;
    ///
    /// struct FixedJitter;
    /// impl BackoffJitter for FixedJitter {
    ///     fn jittered_delay(&self, base: Duration, attempt: u32) -> Duration {
    ///         base + Duration::from_millis(u64::from(attempt))
    ///     }
    /// }
    /// let delay = FixedJitter.jittered_delay(Duration::from_millis(100), 2);
    /// assert_eq!(delay, Duration::from_millis(102));
    /// ```
    fn jittered_delay(&self, base: Duration, attempt: u32) -> Duration;
}

/// Domain-owned availability client.
pub struct AvailabilityClient {
    authority: Arc<dyn AvailabilityAuthority>,
    sleeper: Arc<dyn RetrySleeper>,
    jitter: Arc<dyn BackoffJitter>,
    config: AvailabilityRetryConfig,
}

impl AvailabilityClient {
    /// Build a client using Tokio sleeping and random jitter.
    pub fn new(authority: Arc<dyn AvailabilityAuthority>, config: AvailabilityRetryConfig) -> Self {
        Self::with_runtime(authority, AvailabilityClientRuntime::default(), config)
    }

    /// Build a client with injected runtime abstractions.
    pub fn with_runtime(
        authority: Arc<dyn AvailabilityAuthority>,
        runtime: AvailabilityClientRuntime,
        config: AvailabilityRetryConfig,
    ) -> Self {
        Self {
            authority,
            sleeper: runtime.sleeper,
            jitter: runtime.jitter,
            config,
        }
    }

    /// Check availability, resolving every failure to `Unknown`.
    pub async fn check_availability(&self, criteria: &AvailabilityCriteria) -> AvailabilityResult {
        let attempts = AtomicU32::new(0);
        let outcome = tokio::time::timeout(
            self.config.total_timeout,
            self.run_attempts(criteria, &attempts),
        )
        .await;
        let attempts = attempts.load(Ordering::Relaxed);

        match outcome {
            Ok(Ok(answer)) => map_answer(answer, attempts),
            Ok(Err(error)) => {
                warn!(
                    attempts,
                    origin = %criteria.origin(),
                    destination = %criteria.destination(),
                    error = %error,
                    "availability unresolved; applying fallback"
                );
                AvailabilityResult::unknown(attempts)
            }
            Err(_) => {
                warn!(
                    attempts,
                    origin = %criteria.origin(),
                    destination = %criteria.destination(),
                    ceiling_ms = self.config.total_timeout.as_millis(),
                    "availability check hit total time ceiling; applying fallback"
                );
                AvailabilityResult::unknown(attempts)
            }
        }
    }

    async fn run_attempts(
        &self,
        criteria: &AvailabilityCriteria,
        attempts: &AtomicU32,
    ) -> Result<AuthorityAnswer, AvailabilityAuthorityError> {
        let max_attempts = self.config.effective_max_attempts();
        let mut attempt = 1;

        loop {
            attempts.store(attempt, Ordering::Relaxed);
            debug!(attempt, max_attempts, "querying availability authority");

            match self.authority.query(criteria).await.map_err(AttemptError::from) {
                Ok(answer) => return Ok(answer),
                Err(AttemptError::Retryable(error)) if attempt < max_attempts => {
                    let delay = self
                        .jitter
                        .jittered_delay(self.config.retry_base_delay(attempt), attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = delay.as_millis(),
                        error = %error,
                        "availability attempt failed; retrying"
                    );
                    self.sleeper.sleep(delay).await;
                    attempt += 1;
                }
                Err(AttemptError::Retryable(error) | AttemptError::Final(error)) => {
                    return Err(error);
                }
            }
        }
    }
}

fn map_answer(answer: AuthorityAnswer, attempts: u32) -> AvailabilityResult {
    match answer.verdict {
        AuthorityVerdict::Available => AvailabilityResult::available(answer.capacity, attempts),
        AuthorityVerdict::Unavailable => AvailabilityResult::unavailable(answer.capacity, attempts),
    }
}

#[async_trait]
impl AvailabilityQuery for AvailabilityClient {
    async fn check(&self, criteria: &AvailabilityCriteria) -> AvailabilityResult {
        self.check_availability(criteria).await
    }
}

#[cfg(test)]
mod tests;
