//! Port for minting booking references.
//!
//! Generation is synchronous and must never block on I/O. Implementations
//! are shared across concurrent orchestration runs and must not hand out the
//! same reference twice.

use super::define_port_error;
use crate::domain::BookingReference;

define_port_error! {
    /// Errors raised when no reference could be produced.
    pub enum ReferenceGenerationError {
        /// The randomness source failed.
        Entropy { message: String } =>
            "reference entropy source failed: {message}",
        /// The clock reading could not be encoded.
        Clock { message: String } =>
            "reference clock reading unusable: {message}",
    }
}

/// Source of unique, hard-to-guess booking references.
#[cfg_attr(test, mockall::automock)]
pub trait ReferenceGenerator: Send + Sync {
    /// Produce the next reference.
    fn next_reference(&self) -> Result<BookingReference, ReferenceGenerationError>;
}
