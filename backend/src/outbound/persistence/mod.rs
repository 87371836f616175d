//! Booking persistence adapters.
//!
//! The store is addressed only by booking reference (put-by-key and
//! get-by-key). The in-memory adapter backs the service binary and the
//! behaviour tests.

mod in_memory_booking_repository;

pub use in_memory_booking_repository::InMemoryBookingRepository;
