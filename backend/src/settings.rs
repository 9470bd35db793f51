//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `MENUPLAN_*` environment variables and
//! configuration files, in OrthoConfig's usual precedence.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{SessionPolicy, SessionPolicyError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_TTL_SECS: u64 = 7200;
const DEFAULT_SESSION_SWEEP_SECS: u64 = 300;

/// Errors raised while turning settings into runtime values.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The bind address did not parse as `host:port`.
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        /// Rejected value.
        value: String,
        /// Parser failure.
        #[source]
        source: AddrParseError,
    },
    /// The session lifetime could not be represented.
    #[error("invalid session lifetime: {0}")]
    SessionPolicy(#[from] SessionPolicyError),
}

/// Configuration values for the HTTP server and session lifecycle.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MENUPLAN")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Session lifetime in seconds; `0` disables expiry.
    pub session_ttl_secs: Option<u64>,
    /// Extend a session's lifetime each time it is used.
    #[ortho_config(default = false)]
    pub sliding_sessions: bool,
    /// Seconds between sweeps of expired sessions; `0` disables sweeping.
    pub session_sweep_secs: Option<u64>,
}

impl ServerSettings {
    /// Parsed bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .trim()
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Session policy derived from the lifetime and sliding flag.
    pub fn session_policy(&self) -> Result<SessionPolicy, SettingsError> {
        let ttl_secs = self.session_ttl_secs.unwrap_or(DEFAULT_SESSION_TTL_SECS);
        if ttl_secs == 0 {
            return Ok(SessionPolicy::never_expire());
        }
        let ttl = Duration::from_secs(ttl_secs);
        let policy = if self.sliding_sessions {
            SessionPolicy::sliding(ttl)?
        } else {
            SessionPolicy::fixed(ttl)?
        };
        Ok(policy)
    }

    /// Interval between expiry sweeps, if sweeping is enabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        match self.session_sweep_secs.unwrap_or(DEFAULT_SESSION_SWEEP_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
