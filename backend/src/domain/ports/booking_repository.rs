//! Port for durable booking storage.
//!
//! Records are write-once: adapters must refuse a second save under an
//! existing reference rather than overwrite it.

use async_trait::async_trait;

use crate::domain::{BookingRecord, BookingReference};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "booking repository query failed: {message}",
        /// A record already exists under this reference.
        DuplicateReference { reference: String } =>
            "booking reference {reference} already stored",
    }
}

/// Port for writing and reading booking records by reference.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new record.
    async fn save(&self, record: &BookingRecord) -> Result<(), BookingRepositoryError>;

    /// Find a record by reference.
    async fn find_by_reference(
        &self,
        reference: &BookingReference,
    ) -> Result<Option<BookingRecord>, BookingRepositoryError>;
}
