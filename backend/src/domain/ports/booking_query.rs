//! Driving port for booking lookups.

use async_trait::async_trait;

use crate::domain::{BookingRecord, Error};

/// Driving port for booking read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Fetch a stored booking by its external reference.
    ///
    /// Malformed references fail with `invalid_request`, unknown ones with
    /// `not_found`.
    async fn find_by_reference(&self, reference: &str) -> Result<BookingRecord, Error>;
}
