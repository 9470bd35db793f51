//! In-memory persistence adapters.
//!
//! Each repository keeps its records behind a single `std::sync::RwLock`.
//! Check-then-insert sequences run under one write guard, so concurrent
//! callers observe them atomically. Guards are never held across an
//! `.await`. A poisoned lock is reported as an unavailable store rather than
//! propagated as a panic.
//!
//! # Example
//!
//! ```
//! use menuplan::outbound::memory::InMemoryStores;
//!
//! let stores = InMemoryStores::default();
//! let _accounts = stores.accounts.clone();
//! ```

mod memory_account_repository;
mod memory_menu_repository;
mod memory_session_repository;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use memory_account_repository::InMemoryAccountRepository;
pub use memory_menu_repository::InMemoryMenuRepository;
pub use memory_session_repository::InMemorySessionRepository;

/// One of each in-memory repository, ready to share between services.
#[derive(Clone, Default)]
pub struct InMemoryStores {
    /// Account records.
    pub accounts: Arc<InMemoryAccountRepository>,
    /// Session records.
    pub sessions: Arc<InMemorySessionRepository>,
    /// Menu records.
    pub menus: Arc<InMemoryMenuRepository>,
}

fn poisoned<T>(store: &'static str, _: PoisonError<T>) -> String {
    tracing::error!(store, "store lock poisoned");
    format!("{store} lock poisoned")
}

fn read<'a, T>(
    lock: &'a RwLock<T>,
    store: &'static str,
) -> Result<RwLockReadGuard<'a, T>, String> {
    lock.read().map_err(|err| poisoned(store, err))
}

fn write<'a, T>(
    lock: &'a RwLock<T>,
    store: &'static str,
) -> Result<RwLockWriteGuard<'a, T>, String> {
    lock.write().map_err(|err| poisoned(store, err))
}
