//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

use booking_backend::domain::{AvailabilityRetryConfig, BookingOrchestratorConfig};
use booking_backend::settings::{BookingSettings, SettingsError};

/// Validated configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) availability_endpoint: Url,
    pub(crate) availability_timeout: Duration,
    pub(crate) retry: AvailabilityRetryConfig,
    pub(crate) orchestrator: BookingOrchestratorConfig,
}

impl ServerConfig {
    /// Resolve loaded settings into a server configuration.
    ///
    /// # Errors
    /// Returns [`SettingsError`] when the availability endpoint is missing or
    /// either address fails to parse.
    pub fn from_settings(settings: &BookingSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            availability_endpoint: settings.availability_endpoint()?,
            availability_timeout: settings.availability_timeout(),
            retry: settings.retry_config(),
            orchestrator: settings.orchestrator_config(),
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
