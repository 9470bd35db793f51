//! Session manager: issues, resolves and invalidates session tokens.
//!
//! Raw tokens are returned to callers exactly once and never stored; the
//! repository only ever sees a [`TokenFingerprint`]. Expiry is evaluated
//! lazily against the injected clock, and [`SessionManager::sweep_expired`]
//! reclaims records nobody resolves again.

use std::sync::Arc;

use mockable::Clock;
use tracing::{debug, error, warn};

use super::ports::{AccountRepository, SessionRepository, SessionRepositoryError};
use super::store_errors::{map_account_error, map_session_error};
use super::{
    Account, Error, Session, SessionPolicy, SessionPrincipal, SessionStatus, SessionToken,
    TokenFingerprint,
};

/// Attempts made to find an unused fingerprint before giving up.
const TOKEN_ATTEMPTS: u32 = 3;

/// Domain service owning session records.
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<dyn SessionRepository>,
    accounts: Arc<dyn AccountRepository>,
    clock: Arc<dyn Clock>,
    policy: SessionPolicy,
}

impl SessionManager {
    /// Create a manager.
    ///
    /// `accounts` is only read, to turn a session back into its account.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        accounts: Arc<dyn AccountRepository>,
        clock: Arc<dyn Clock>,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            sessions,
            accounts,
            clock,
            policy,
        }
    }

    /// Active expiry policy.
    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    /// Open a session for `account` and return its raw token.
    ///
    /// # Errors
    /// `InternalError` if the random source fails or no unused fingerprint is
    /// found; `StoreUnavailable` on store failure.
    pub async fn create_session(&self, account: &Account) -> Result<SessionToken, Error> {
        let now = self.clock.utc();
        let expires_at = self.policy.expiry_from(now);

        for attempt in 1..=TOKEN_ATTEMPTS {
            let token = SessionToken::generate().map_err(|err| {
                error!(error = %err, "random source failed");
                Error::internal("session token generation failed")
            })?;
            let session = Session::new(token.fingerprint(), account.id(), now, expires_at);
            match self.sessions.insert(&session).await {
                Ok(()) => {
                    debug!(account_id = %account.id(), "session created");
                    return Ok(token);
                }
                Err(SessionRepositoryError::Conflict) => {
                    warn!(attempt, "session fingerprint collision");
                }
                Err(other) => return Err(map_session_error(other)),
            }
        }

        error!(attempts = TOKEN_ATTEMPTS, "no unused session fingerprint");
        Err(Error::internal("session token generation failed"))
    }

    /// Resolve `token` to the account it authorises.
    ///
    /// Returns `Ok(None)` for unknown, expired or orphaned tokens. Expired
    /// and orphaned records are removed on the way out. Under a sliding
    /// policy a successful resolution pushes the expiry to `now + ttl`.
    pub async fn resolve_session(
        &self,
        token: &SessionToken,
    ) -> Result<Option<SessionPrincipal>, Error> {
        let fingerprint = token.fingerprint();
        let Some(session) = self
            .sessions
            .find(&fingerprint)
            .await
            .map_err(map_session_error)?
        else {
            return Ok(None);
        };

        let now = self.clock.utc();
        if session.status_at(now) == SessionStatus::Expired {
            self.discard(&fingerprint).await?;
            debug!(account_id = %session.account_id(), "expired session discarded");
            return Ok(None);
        }

        let Some(account) = self
            .accounts
            .find_by_id(session.account_id())
            .await
            .map_err(map_account_error)?
        else {
            self.discard(&fingerprint).await?;
            warn!(account_id = %session.account_id(), "session without account discarded");
            return Ok(None);
        };

        if self.policy.is_sliding() {
            let refreshed = self
                .sessions
                .update_expiry(&fingerprint, self.policy.expiry_from(now))
                .await
                .map_err(map_session_error)?;
            // Invalidated between the read and the refresh.
            if !refreshed {
                return Ok(None);
            }
        }

        Ok(Some(SessionPrincipal::new(account)))
    }

    /// Remove the session for `token`. Unknown tokens are a no-op.
    pub async fn invalidate_session(&self, token: &SessionToken) -> Result<(), Error> {
        if self.discard(&token.fingerprint()).await? {
            debug!("session invalidated");
        }
        Ok(())
    }

    /// Remove every session that has expired by now. Returns the count.
    pub async fn sweep_expired(&self) -> Result<usize, Error> {
        let removed = self
            .sessions
            .remove_expired(self.clock.utc())
            .await
            .map_err(map_session_error)?;
        if removed > 0 {
            debug!(removed, "expired sessions swept");
        }
        Ok(removed)
    }

    async fn discard(&self, fingerprint: &TokenFingerprint) -> Result<bool, Error> {
        self.sessions
            .remove(fingerprint)
            .await
            .map_err(map_session_error)
    }
}
