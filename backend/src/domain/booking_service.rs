//! Booking orchestration services.
//!
//! `BookingOrchestrator` drives one request through validation, the
//! availability check, the decision, and (for confirmed bookings) reference
//! assignment and persistence. Driven-port errors are mapped to domain error
//! codes here and nowhere else. No state is shared between requests beyond
//! the collaborators themselves.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::ports::{
    AvailabilityQuery, BookingCommand, BookingQuery, BookingRepository, BookingRepositoryError,
    ReferenceGenerationError, ReferenceGenerator,
};
use crate::domain::{
    AvailabilityResult, AvailabilityVerdict, BookingOutcome, BookingRecord, BookingReference,
    BookingRejection, BookingRequest, BookingRequestDraft, BookingStatus, Error, RejectionReason,
};

fn map_repository_error(error: BookingRepositoryError) -> Error {
    let reason = match &error {
        BookingRepositoryError::Connection { .. } => "connection",
        BookingRepositoryError::Query { .. } => "query",
        BookingRepositoryError::DuplicateReference { .. } => "duplicate_reference",
    };
    Error::persistence_failed(format!("booking could not be stored: {error}"))
        .with_details(json!({ "reason": reason }))
}

fn map_reference_error(error: ReferenceGenerationError) -> Error {
    Error::reference_generation_failed(format!("booking reference unavailable: {error}"))
}

/// Decision policy: only a positive answer confirms. An indeterminate
/// answer is never treated as a confirmation.
fn rejection_reason(availability: &AvailabilityResult) -> Option<RejectionReason> {
    match availability.verdict() {
        AvailabilityVerdict::Available => None,
        AvailabilityVerdict::Unavailable => Some(RejectionReason::Unavailable),
        AvailabilityVerdict::Unknown => Some(RejectionReason::AvailabilityIndeterminate),
    }
}

/// Orchestrator behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookingOrchestratorConfig {
    /// Persist rejected outcomes, with a reference, as an audit trail.
    pub record_rejections: bool,
}

/// Collaborators required by the orchestrator.
pub struct BookingOrchestratorPorts {
    pub availability: Arc<dyn AvailabilityQuery>,
    pub references: Arc<dyn ReferenceGenerator>,
    pub repository: Arc<dyn BookingRepository>,
}

impl BookingOrchestratorPorts {
    pub fn new(
        availability: Arc<dyn AvailabilityQuery>,
        references: Arc<dyn ReferenceGenerator>,
        repository: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            availability,
            references,
            repository,
        }
    }
}

/// Booking service implementing the command driving port.
pub struct BookingOrchestrator {
    availability: Arc<dyn AvailabilityQuery>,
    references: Arc<dyn ReferenceGenerator>,
    repository: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
    config: BookingOrchestratorConfig,
}

impl BookingOrchestrator {
    pub fn new(
        ports: BookingOrchestratorPorts,
        clock: Arc<dyn Clock>,
        config: BookingOrchestratorConfig,
    ) -> Self {
        Self {
            availability: ports.availability,
            references: ports.references,
            repository: ports.repository,
            clock,
            config,
        }
    }

    async fn record(
        &self,
        request: BookingRequest,
        status: BookingStatus,
        availability: AvailabilityResult,
    ) -> Result<BookingRecord, Error> {
        let reference = self.references.next_reference().map_err(|err| {
            error!(error = %err, "booking reference generation failed");
            map_reference_error(err)
        })?;
        let record = BookingRecord::from_request(
            reference,
            request,
            status,
            availability,
            self.clock.utc(),
        );

        self.repository.save(&record).await.map_err(|err| {
            error!(
                reference = %record.reference(),
                error = %err,
                "booking persistence failed"
            );
            map_repository_error(err)
        })?;
        Ok(record)
    }
}

#[async_trait]
impl BookingCommand for BookingOrchestrator {
    async fn create_booking(&self, draft: BookingRequestDraft) -> Result<BookingOutcome, Error> {
        let request = BookingRequest::validate(&draft, self.clock.utc()).map_err(|err| {
            debug!(field = err.field(), code = err.code(), "booking request rejected by validation");
            Error::from(err)
        })?;

        let availability = self.availability.check(&request.criteria()).await;

        match rejection_reason(&availability) {
            None => {
                let record = self
                    .record(request, BookingStatus::Confirmed, availability)
                    .await?;
                info!(
                    reference = %record.reference(),
                    attempts = availability.attempts(),
                    "booking confirmed"
                );
                Ok(BookingOutcome::Confirmed(record))
            }
            Some(reason) => {
                let reference = if self.config.record_rejections {
                    let record = self
                        .record(request, BookingStatus::Rejected, availability)
                        .await?;
                    Some(record.reference().clone())
                } else {
                    None
                };
                info!(
                    reason = reason.as_str(),
                    fallback_used = availability.fallback_used(),
                    attempts = availability.attempts(),
                    "booking rejected"
                );
                Ok(BookingOutcome::Rejected(BookingRejection::new(
                    reason,
                    availability,
                    reference,
                )))
            }
        }
    }
}

/// Booking service implementing the query driving port.
#[derive(Clone)]
pub struct BookingQueryService {
    repository: Arc<dyn BookingRepository>,
}

impl BookingQueryService {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BookingQuery for BookingQueryService {
    async fn find_by_reference(&self, reference: &str) -> Result<BookingRecord, Error> {
        let reference = BookingReference::parse(reference)?;
        self.repository
            .find_by_reference(&reference)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("booking {reference} not found")))
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
