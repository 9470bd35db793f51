//! Session data model: opaque tokens, stored session records and expiry
//! policy.
//!
//! Tokens are 256-bit values from the operating system's CSPRNG. The store
//! only ever sees a SHA-256 fingerprint of a token, so a dump of the session
//! table cannot be replayed.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::account::{Account, AccountId};

/// Number of random bytes in a session token.
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Upper bound on accepted token length; longer input cannot be ours.
const MAX_TOKEN_LEN: usize = 256;

/// Opaque bearer token handed to the caller after authentication.
///
/// The raw value is wiped from memory on drop and never appears in `Debug`
/// output.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Draw a fresh token from the OS random source.
    pub fn generate() -> Result<Self, rand::Error> {
        let mut bytes = Zeroizing::new([0_u8; SESSION_TOKEN_BYTES]);
        OsRng.try_fill_bytes(bytes.as_mut_slice())?;
        Ok(Self(Zeroizing::new(hex::encode(bytes.as_slice()))))
    }

    /// Accept a caller-presented token.
    ///
    /// Returns `None` for blank or oversized input. Any other string is
    /// accepted here; whether it names a live session is decided by
    /// resolution.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.len() > MAX_TOKEN_LEN {
            return None;
        }
        Some(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Raw token value for handing back to the caller.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Storage key derived from the token.
    pub fn fingerprint(&self) -> TokenFingerprint {
        let digest = Sha256::digest(self.0.as_bytes());
        TokenFingerprint(hex::encode(digest))
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Hex-encoded SHA-256 digest of a session token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenFingerprint(String);

impl TokenFingerprint {
    /// Borrow the hex digest.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TokenFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a stored session at a given instant.
///
/// Invalidated sessions are removed from the store, so only the two
/// time-based states are observable on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// The session authorises requests.
    Active,
    /// The expiry instant has passed. Terminal.
    Expired,
}

/// Stored session record.
///
/// ## Invariants
/// - `account_id` referenced an existing account when the record was made.
/// - `expires_at`, when present, is never before `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    fingerprint: TokenFingerprint,
    account_id: AccountId,
    created_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Build a session record.
    pub fn new(
        fingerprint: TokenFingerprint,
        account_id: AccountId,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            fingerprint,
            account_id,
            created_at,
            expires_at: expires_at.map(|at| at.max(created_at)),
        }
    }

    /// Storage key.
    pub fn fingerprint(&self) -> &TokenFingerprint {
        &self.fingerprint
    }

    /// Owning account.
    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Expiry instant, if the session expires at all.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Evaluate the session's state at `now`.
    pub fn status_at(&self, now: DateTime<Utc>) -> SessionStatus {
        match self.expires_at {
            Some(expires_at) if now >= expires_at => SessionStatus::Expired,
            _ => SessionStatus::Active,
        }
    }

    /// Copy of this session with a new expiry instant.
    #[must_use]
    pub fn with_expiry(&self, expires_at: Option<DateTime<Utc>>) -> Self {
        Self::new(
            self.fingerprint.clone(),
            self.account_id,
            self.created_at,
            expires_at,
        )
    }
}

/// Errors raised when building a [`SessionPolicy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPolicyError {
    /// The duration does not fit a calendar offset.
    TtlOutOfRange,
    /// A zero duration would expire sessions on creation.
    ZeroTtl,
}

impl fmt::Display for SessionPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TtlOutOfRange => write!(f, "session ttl is out of range"),
            Self::ZeroTtl => write!(f, "session ttl must be greater than zero"),
        }
    }
}

impl std::error::Error for SessionPolicyError {}

/// Expiry policy applied by the session manager.
///
/// The default policy never expires sessions; they live until invalidated.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use menuplan::domain::SessionPolicy;
///
/// let policy = SessionPolicy::fixed(Duration::from_secs(3600)).unwrap();
/// assert!(!policy.is_sliding());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionPolicy {
    ttl: Option<TimeDelta>,
    sliding: bool,
}

impl SessionPolicy {
    /// Sessions live until explicitly invalidated.
    pub fn never_expire() -> Self {
        Self::default()
    }

    /// Sessions expire `ttl` after creation.
    pub fn fixed(ttl: Duration) -> Result<Self, SessionPolicyError> {
        Ok(Self {
            ttl: Some(Self::to_delta(ttl)?),
            sliding: false,
        })
    }

    /// Sessions expire `ttl` after their last successful resolution.
    pub fn sliding(ttl: Duration) -> Result<Self, SessionPolicyError> {
        Ok(Self {
            ttl: Some(Self::to_delta(ttl)?),
            sliding: true,
        })
    }

    fn to_delta(ttl: Duration) -> Result<TimeDelta, SessionPolicyError> {
        if ttl.is_zero() {
            return Err(SessionPolicyError::ZeroTtl);
        }
        TimeDelta::from_std(ttl).map_err(|_| SessionPolicyError::TtlOutOfRange)
    }

    /// Configured lifetime, if any.
    pub fn ttl(&self) -> Option<TimeDelta> {
        self.ttl
    }

    /// Whether resolution pushes the expiry forward.
    pub fn is_sliding(&self) -> bool {
        self.sliding && self.ttl.is_some()
    }

    /// Expiry instant for a session created or refreshed at `now`.
    ///
    /// An offset that overflows the calendar means the session never
    /// expires.
    pub fn expiry_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.ttl.and_then(|ttl| now.checked_add_signed(ttl))
    }
}

/// Account obtained by resolving a live session.
///
/// Only the session manager can build one, so anything that takes a
/// principal is guaranteed to act for an authenticated caller rather than
/// for an arbitrary, caller-supplied account id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPrincipal {
    account: Account,
}

impl SessionPrincipal {
    pub(crate) fn new(account: Account) -> Self {
        Self { account }
    }

    /// Authenticated account.
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Authenticated account id.
    pub fn account_id(&self) -> AccountId {
        self.account.id()
    }

    /// Consume the principal and return the account.
    pub fn into_account(self) -> Account {
        self.account
    }
}
