//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed booking entities and the orchestration that
//! decides them. Keep invariants in constructors and keep transport and
//! storage concerns out of this module; adapters reach the domain through
//! `ports` only.
//!
//! Public surface:
//! - `Error` / `ErrorCode` for stable, caller-facing failures.
//! - `BookingRequest`, `BookingRecord`, `BookingOutcome` and their value types.
//! - `AvailabilityCriteria` / `AvailabilityResult` for the tri-state check.
//! - `AvailabilityClient`, `BookingOrchestrator`, `BookingQueryService`.
//! - `TraceId` for request correlation.

pub mod availability;
pub mod availability_client;
pub mod booking;
pub mod booking_service;
pub mod error;
pub mod ports;
pub mod reference;
pub mod trace_id;

pub use self::availability::{
    AvailabilityCriteria, AvailabilityResult, AvailabilityVerdict, CapacityHint,
};
pub use self::availability_client::{
    AttemptJitter, AvailabilityClient, AvailabilityClientRuntime, AvailabilityRetryConfig,
    BackoffJitter, RetrySleeper, TokioSleeper,
};
pub use self::booking::{
    BookingOutcome, BookingRecord, BookingRejection, BookingRequest, BookingRequestDraft,
    BookingStatus, BookingValidationError, CargoDescriptor, LocationCode, RejectionReason,
    RequesterId, SlotWindow,
};
pub use self::booking_service::{
    BookingOrchestrator, BookingOrchestratorConfig, BookingOrchestratorPorts, BookingQueryService,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::reference::{BookingReference, RandomReferenceGenerator};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
