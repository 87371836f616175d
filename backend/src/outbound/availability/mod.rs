//! Availability authority outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `AvailabilityAuthority` port.

mod dto;
mod http_authority;

pub use http_authority::HttpAvailabilityAuthority;
