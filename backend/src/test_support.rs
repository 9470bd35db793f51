//! Test utilities for the backend crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).
//! Compiled for tests and behind the `test-support` feature.

mod clock;

use std::sync::Arc;

use argon2::Params;
use chrono::{DateTime, Utc};

pub use clock::MutableClock;

use crate::domain::{
    AuthorizationFacade, CredentialStore, MenuOwnershipIndex, SecretHasher, SessionManager,
    SessionPolicy,
};
use crate::outbound::memory::InMemoryStores;

/// Fixed instant tests start from: 2026-01-01T00:00:00Z.
pub fn fixed_now() -> DateTime<Utc> {
    match DateTime::from_timestamp(1_767_225_600, 0) {
        Some(now) => now,
        None => panic!("fixed timestamp in range"),
    }
}

/// A [`MutableClock`] parked at [`fixed_now`].
pub fn fixed_clock() -> Arc<MutableClock> {
    Arc::new(MutableClock::new(fixed_now()))
}

/// Argon2id with the smallest permitted cost, so tests stay fast.
pub fn low_cost_hasher() -> SecretHasher {
    match Params::new(8, 1, 1, None) {
        Ok(params) => SecretHasher::new(params),
        Err(error) => panic!("argon2 test params: {error}"),
    }
}

/// Authorization facade over fresh in-memory stores.
pub struct InMemoryAuthorization {
    pub service: AuthorizationFacade,
    pub sessions: Arc<SessionManager>,
    pub stores: InMemoryStores,
    pub clock: Arc<MutableClock>,
}

/// Wire a facade over in-memory stores, a fixed clock and cheap hashing.
pub fn in_memory_authorization(policy: SessionPolicy) -> InMemoryAuthorization {
    let stores = InMemoryStores::default();
    let clock = fixed_clock();
    let credentials = Arc::new(CredentialStore::new(
        stores.accounts.clone(),
        low_cost_hasher(),
        clock.clone(),
    ));
    let sessions = Arc::new(SessionManager::new(
        stores.sessions.clone(),
        stores.accounts.clone(),
        clock.clone(),
        policy,
    ));
    let menus = Arc::new(MenuOwnershipIndex::new(stores.menus.clone(), clock.clone()));
    InMemoryAuthorization {
        service: AuthorizationFacade::new(credentials, Arc::clone(&sessions), menus),
        sessions,
        stores,
        clock,
    }
}
