//! Driving port for booking creation.
//!
//! Inbound adapters hand over a raw [`BookingRequestDraft`]; validation,
//! availability, reference assignment and persistence all happen behind the
//! port.

use async_trait::async_trait;

use crate::domain::{BookingOutcome, BookingRequestDraft, Error};

/// Driving port for booking write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Validate and decide a booking request.
    ///
    /// Returns `Confirmed` or `Rejected` as successful outcomes. `Err` carries
    /// one stable [`crate::domain::ErrorCode`]: `invalid_request`,
    /// `persistence_failed` or `reference_generation_failed`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use booking_backend::domain::BookingRequestDraft;
    /// # use booking_backend::domain::ports::BookingCommand;
    /// # async fn example(
    /// #     command: &dyn BookingCommand,
    /// #     draft: BookingRequestDraft,
    /// # ) -> Result<(), booking_backend::domain::Error> {
    /// let outcome = command.create_booking(draft).await?;
    /// if outcome.is_confirmed() {
    ///     println!("booking confirmed");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn create_booking(&self, draft: BookingRequestDraft) -> Result<BookingOutcome, Error>;
}
