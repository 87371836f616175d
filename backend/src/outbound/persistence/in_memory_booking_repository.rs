//! In-process `BookingRepository` keyed by reference.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{BookingRecord, BookingReference};

/// Write-once booking store held in memory.
///
/// Saving under an existing reference fails with `DuplicateReference` and
/// leaves the stored record untouched.
#[derive(Debug, Default)]
pub struct InMemoryBookingRepository {
    records: RwLock<HashMap<BookingReference, BookingRecord>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn save(&self, record: &BookingRecord) -> Result<(), BookingRepositoryError> {
        let mut records = self.records.write().await;
        if records.contains_key(record.reference()) {
            return Err(BookingRepositoryError::duplicate_reference(
                record.reference().as_str(),
            ));
        }
        records.insert(record.reference().clone(), record.clone());
        Ok(())
    }

    async fn find_by_reference(
        &self,
        reference: &BookingReference,
    ) -> Result<Option<BookingRecord>, BookingRepositoryError> {
        Ok(self.records.read().await.get(reference).cloned())
    }
}
