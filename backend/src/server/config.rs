//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use menuplan::domain::SessionPolicy;
use menuplan::settings::{ServerSettings, SettingsError};

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) session_policy: SessionPolicy,
    pub(crate) sweep_interval: Option<Duration>,
}

impl ServerConfig {
    /// Construct a server configuration with sweeping disabled.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, session_policy: SessionPolicy) -> Self {
        Self {
            bind_addr,
            session_policy,
            sweep_interval: None,
        }
    }

    /// Sweep expired sessions every `interval`.
    #[must_use]
    pub fn with_sweep_interval(mut self, interval: Option<Duration>) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Resolve loaded settings into a configuration.
    pub fn from_settings(settings: &ServerSettings) -> Result<Self, SettingsError> {
        Ok(Self::new(settings.bind_addr()?, settings.session_policy()?)
            .with_sweep_interval(settings.sweep_interval()))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
