//! Readiness and liveness probes for the booking service.
//!
//! Readiness flips once the booking pipeline (availability client, reference
//! generator and booking store) is wired and the listener is bound. Liveness
//! only reports that the process still answers HTTP.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, HttpResponseBuilder, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Shared readiness flag for the booking pipeline.
#[derive(Debug, Default)]
pub struct HealthState {
    ready: AtomicBool,
}

impl HealthState {
    /// Create a state that reports not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the pipeline as able to take booking traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Probe payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeBody {
    #[schema(example = "ready")]
    status: &'static str,
}

fn probe_response(mut builder: HttpResponseBuilder, status: &'static str) -> HttpResponse {
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeBody { status })
}

/// Readiness probe: 200 once bookings are accepted, 503 while starting.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Booking pipeline is wired", body = ProbeBody),
        (status = 503, description = "Service is still starting", body = ProbeBody)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    if state.is_ready() {
        probe_response(HttpResponse::Ok(), "ready")
    } else {
        probe_response(HttpResponse::ServiceUnavailable(), "starting")
    }
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses((status = 200, description = "Process is serving HTTP", body = ProbeBody))
)]
#[get("/health/live")]
pub async fn live() -> HttpResponse {
    probe_response(HttpResponse::Ok(), "alive")
}
