//! HTTP inbound adapter exposing REST endpoints.

pub mod availability;
pub mod bookings;
pub mod error;
pub mod health;
pub mod state;
pub mod validation;

pub use error::ApiResult;

use actix_web::{Scope, web};

/// `/api/v1` scope with every booking and availability endpoint registered.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(bookings::create_booking)
        .service(bookings::get_booking)
        .service(availability::check_availability)
}
