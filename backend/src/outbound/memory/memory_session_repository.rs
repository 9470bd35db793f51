//! In-memory session repository keyed by token fingerprint.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{SessionRepository, SessionRepositoryError};
use crate::domain::{Session, SessionStatus, TokenFingerprint};

use super::{read, write};

const STORE: &str = "sessions";

/// Session store holding fingerprints only; raw tokens never reach it.
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<TokenFingerprint, Session>>,
}

impl InMemorySessionRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn insert(&self, session: &Session) -> Result<(), SessionRepositoryError> {
        let mut sessions =
            write(&self.sessions, STORE).map_err(SessionRepositoryError::unavailable)?;
        match sessions.entry(session.fingerprint().clone()) {
            Entry::Occupied(_) => Err(SessionRepositoryError::conflict()),
            Entry::Vacant(slot) => {
                slot.insert(session.clone());
                Ok(())
            }
        }
    }

    async fn find(
        &self,
        fingerprint: &TokenFingerprint,
    ) -> Result<Option<Session>, SessionRepositoryError> {
        let sessions = read(&self.sessions, STORE).map_err(SessionRepositoryError::unavailable)?;
        Ok(sessions.get(fingerprint).cloned())
    }

    async fn update_expiry(
        &self,
        fingerprint: &TokenFingerprint,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<bool, SessionRepositoryError> {
        let mut sessions =
            write(&self.sessions, STORE).map_err(SessionRepositoryError::unavailable)?;
        let Some(session) = sessions.get_mut(fingerprint) else {
            return Ok(false);
        };
        *session = session.with_expiry(expires_at);
        Ok(true)
    }

    async fn remove(&self, fingerprint: &TokenFingerprint) -> Result<bool, SessionRepositoryError> {
        let mut sessions =
            write(&self.sessions, STORE).map_err(SessionRepositoryError::unavailable)?;
        Ok(sessions.remove(fingerprint).is_some())
    }

    async fn remove_expired(&self, now: DateTime<Utc>) -> Result<usize, SessionRepositoryError> {
        let mut sessions =
            write(&self.sessions, STORE).map_err(SessionRepositoryError::unavailable)?;
        let before = sessions.len();
        sessions.retain(|_, session| session.status_at(now) == SessionStatus::Active);
        Ok(before - sessions.len())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory session repository.
    use chrono::TimeDelta;

    use super::*;
    use crate::domain::{AccountId, SessionToken};
    use crate::test_support::fixed_now;
    use rstest::rstest;

    fn session(expires_in: Option<i64>) -> Session {
        let token = SessionToken::generate().expect("token");
        let now = fixed_now();
        Session::new(
            token.fingerprint(),
            AccountId::new(1),
            now,
            expires_in.map(|secs| now + TimeDelta::seconds(secs)),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_fingerprints_conflict() {
        let repository = InMemorySessionRepository::new();
        let stored = session(None);
        repository.insert(&stored).await.expect("insert");
        let err = repository.insert(&stored).await.expect_err("conflict");
        assert!(matches!(err, SessionRepositoryError::Conflict));
    }

    #[rstest]
    #[tokio::test]
    async fn removed_sessions_are_not_resurrected_by_refresh() {
        let repository = InMemorySessionRepository::new();
        let stored = session(Some(60));
        repository.insert(&stored).await.expect("insert");

        assert!(repository.remove(stored.fingerprint()).await.expect("remove"));
        assert!(!repository.remove(stored.fingerprint()).await.expect("remove"));
        let refreshed = repository
            .update_expiry(stored.fingerprint(), Some(fixed_now() + TimeDelta::hours(1)))
            .await
            .expect("update");
        assert!(!refreshed);
        assert_eq!(
            repository.find(stored.fingerprint()).await.expect("find"),
            None
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_expiry_replaces_the_deadline() {
        let repository = InMemorySessionRepository::new();
        let stored = session(Some(60));
        repository.insert(&stored).await.expect("insert");
        let later = fixed_now() + TimeDelta::hours(2);

        assert!(
            repository
                .update_expiry(stored.fingerprint(), Some(later))
                .await
                .expect("update")
        );
        let found = repository
            .find(stored.fingerprint())
            .await
            .expect("find")
            .expect("present");
        assert_eq!(found.expires_at(), Some(later));
    }

    #[rstest]
    #[tokio::test]
    async fn remove_expired_keeps_live_and_unbounded_sessions() {
        let repository = InMemorySessionRepository::new();
        let expired = session(Some(10));
        let boundary = session(Some(30));
        let live = session(Some(60));
        let unbounded = session(None);
        for stored in [&expired, &boundary, &live, &unbounded] {
            repository.insert(stored).await.expect("insert");
        }

        let removed = repository
            .remove_expired(fixed_now() + TimeDelta::seconds(30))
            .await
            .expect("sweep");
        assert_eq!(removed, 2);
        assert!(repository.find(live.fingerprint()).await.expect("find").is_some());
        assert!(repository.find(unbounded.fingerprint()).await.expect("find").is_some());
        assert!(repository.find(boundary.fingerprint()).await.expect("find").is_none());
    }
}
