//! Port for session persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Session, TokenFingerprint};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session repository adapters.
    pub enum SessionRepositoryError {
        /// A session with the same fingerprint already exists.
        Conflict => "session fingerprint already in use",
        /// The backing store could not serve the request.
        Unavailable { message: String } => "session repository unavailable: {message}",
    }
}

/// Port owning session records, keyed by token fingerprint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Store a new session; fails with `Conflict` if the fingerprint exists.
    async fn insert(&self, session: &Session) -> Result<(), SessionRepositoryError>;

    /// Fetch a session by fingerprint.
    async fn find(
        &self,
        fingerprint: &TokenFingerprint,
    ) -> Result<Option<Session>, SessionRepositoryError>;

    /// Replace the expiry of an existing session.
    ///
    /// Returns `false` when the session no longer exists; a removed session
    /// is never resurrected.
    async fn update_expiry(
        &self,
        fingerprint: &TokenFingerprint,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<bool, SessionRepositoryError>;

    /// Remove a session. Returns whether a record was present.
    async fn remove(&self, fingerprint: &TokenFingerprint) -> Result<bool, SessionRepositoryError>;

    /// Remove every session whose expiry is at or before `now`.
    async fn remove_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionRepositoryError>;
}
