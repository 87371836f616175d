//! Reqwest-backed availability authority adapter.
//!
//! This adapter owns transport details only: request serialisation, the
//! per-attempt timeout, HTTP status mapping and JSON decoding. Retries live
//! in the domain `AvailabilityClient`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use super::dto::{AvailabilityRequestDto, AvailabilityResponseDto};
use crate::domain::AvailabilityCriteria;
use crate::domain::ports::{AuthorityAnswer, AvailabilityAuthority, AvailabilityAuthorityError};

const USER_AGENT: &str = concat!("booking-backend/", env!("CARGO_PKG_VERSION"));

/// Availability authority adapter that POSTs JSON queries to one endpoint.
pub struct HttpAvailabilityAuthority {
    client: Client,
    endpoint: Url,
}

impl HttpAvailabilityAuthority {
    /// Build an adapter with an explicit per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl AvailabilityAuthority for HttpAvailabilityAuthority {
    async fn query(
        &self,
        criteria: &AvailabilityCriteria,
    ) -> Result<AuthorityAnswer, AvailabilityAuthorityError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&AvailabilityRequestDto::from(criteria))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_answer(body.as_ref())
    }
}

fn parse_answer(body: &[u8]) -> Result<AuthorityAnswer, AvailabilityAuthorityError> {
    let decoded: AvailabilityResponseDto = serde_json::from_slice(body).map_err(|error| {
        AvailabilityAuthorityError::decode(format!("invalid availability payload: {error}"))
    })?;
    Ok(decoded.into())
}

fn map_transport_error(error: reqwest::Error) -> AvailabilityAuthorityError {
    if error.is_timeout() {
        AvailabilityAuthorityError::timeout(error.to_string())
    } else if error.is_decode() {
        AvailabilityAuthorityError::decode(error.to_string())
    } else {
        AvailabilityAuthorityError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> AvailabilityAuthorityError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => AvailabilityAuthorityError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            AvailabilityAuthorityError::timeout(message)
        }
        _ if status.is_client_error() => {
            AvailabilityAuthorityError::rejected(status.as_u16(), message)
        }
        _ => AvailabilityAuthorityError::upstream(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
