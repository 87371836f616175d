//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `BOOKING_*` environment variables and an
//! optional config file, in OrthoConfig's usual precedence. Accessors turn
//! the raw values into the typed configuration objects the domain and
//! adapters take at construction time.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::{AvailabilityRetryConfig, BookingOrchestratorConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_AVAILABILITY_TIMEOUT: Duration = Duration::from_secs(2);

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("availability_url must be set")]
    MissingAvailabilityUrl,
    #[error("availability_url {value:?} is not a valid URL: {source}")]
    InvalidAvailabilityUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("bind_addr {value:?} is not a socket address: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Configuration values for the booking service.
///
/// Numeric knobs stay optional so an unset value never shadows a lower
/// layer; the accessors supply the defaults.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKING")]
pub struct BookingSettings {
    /// Endpoint receiving availability queries, used as-is.
    pub availability_url: Option<String>,
    /// Per-attempt HTTP timeout for the availability authority.
    pub availability_timeout_ms: Option<u64>,
    pub retry_max_attempts: Option<u32>,
    pub retry_initial_backoff_ms: Option<u64>,
    pub retry_max_backoff_ms: Option<u64>,
    /// Ceiling on one availability check, retries and backoff included.
    pub retry_total_timeout_ms: Option<u64>,
    /// Persist rejected bookings with a reference for audit.
    #[ortho_config(default = false)]
    pub record_rejections: bool,
    /// Listener address; defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
}

impl BookingSettings {
    /// Parse the configured availability endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingAvailabilityUrl`] when unset and
    /// [`SettingsError::InvalidAvailabilityUrl`] when unparsable.
    pub fn availability_endpoint(&self) -> Result<Url, SettingsError> {
        let raw = self
            .availability_url
            .as_deref()
            .ok_or(SettingsError::MissingAvailabilityUrl)?;
        Url::parse(raw).map_err(|source| SettingsError::InvalidAvailabilityUrl {
            value: raw.to_owned(),
            source,
        })
    }

    pub fn availability_timeout(&self) -> Duration {
        self.availability_timeout_ms
            .map_or(DEFAULT_AVAILABILITY_TIMEOUT, Duration::from_millis)
    }

    /// Retry policy, with unset fields taken from
    /// [`AvailabilityRetryConfig::default`].
    pub fn retry_config(&self) -> AvailabilityRetryConfig {
        let defaults = AvailabilityRetryConfig::default();
        AvailabilityRetryConfig {
            max_attempts: self.retry_max_attempts.unwrap_or(defaults.max_attempts),
            initial_backoff: self
                .retry_initial_backoff_ms
                .map_or(defaults.initial_backoff, Duration::from_millis),
            max_backoff: self
                .retry_max_backoff_ms
                .map_or(defaults.max_backoff, Duration::from_millis),
            total_timeout: self
                .retry_total_timeout_ms
                .map_or(defaults.total_timeout, Duration::from_millis),
        }
    }

    pub fn orchestrator_config(&self) -> BookingOrchestratorConfig {
        BookingOrchestratorConfig {
            record_rejections: self.record_rejections,
        }
    }

    /// Return the listener address, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] when the value does not
    /// parse as `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                source,
            })
    }
}
