//! Attempt-local classification of one authority call failure.

use crate::domain::ports::AvailabilityAuthorityError;

pub(super) enum AttemptError {
    Retryable(AvailabilityAuthorityError),
    Final(AvailabilityAuthorityError),
}

impl From<AvailabilityAuthorityError> for AttemptError {
    fn from(error: AvailabilityAuthorityError) -> Self {
        if error.is_retryable() {
            Self::Retryable(error)
        } else {
            Self::Final(error)
        }
    }
}
