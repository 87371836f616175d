//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`AvailabilityAuthority`, `BookingRepository`,
//! `ReferenceGenerator`) expose typed errors so adapters map their failures
//! into predictable variants. Driving ports (`AvailabilityQuery`,
//! `BookingCommand`, `BookingQuery`) speak [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod availability_authority;
mod availability_query;
mod booking_command;
mod booking_query;
mod booking_repository;
mod reference_generator;

#[cfg(test)]
pub use availability_authority::MockAvailabilityAuthority;
pub use availability_authority::{
    AuthorityAnswer, AuthorityVerdict, AvailabilityAuthority, AvailabilityAuthorityError,
    FixtureAvailabilityAuthority,
};
#[cfg(test)]
pub use availability_query::MockAvailabilityQuery;
pub use availability_query::{AvailabilityQuery, FixtureAvailabilityQuery};
#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_command::BookingCommand;
#[cfg(test)]
pub use booking_query::MockBookingQuery;
pub use booking_query::BookingQuery;
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use reference_generator::MockReferenceGenerator;
pub use reference_generator::{ReferenceGenerationError, ReferenceGenerator};
