//! In-memory account repository.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{Account, AccountId, Email, NewAccount};

use super::{read, write};

const STORE: &str = "accounts";

#[derive(Default)]
struct AccountTable {
    by_id: BTreeMap<AccountId, Account>,
    by_email: HashMap<Email, AccountId>,
    last_id: u64,
}

/// Account store assigning ids from a monotonic counter starting at 1.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    table: RwLock<AccountTable>,
}

impl InMemoryAccountRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert_new(&self, account: NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut table = write(&self.table, STORE).map_err(AccountRepositoryError::unavailable)?;
        if table.by_email.contains_key(&account.email) {
            return Err(AccountRepositoryError::duplicate(account.email));
        }

        let next = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| AccountRepositoryError::unavailable("account id space exhausted"))?;
        table.last_id = next;
        let id = AccountId::new(next);
        let stored = Account::new(id, account);
        table.by_email.insert(stored.email().clone(), id);
        table.by_id.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountRepositoryError> {
        let table = read(&self.table, STORE).map_err(AccountRepositoryError::unavailable)?;
        Ok(table
            .by_email
            .get(email)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let table = read(&self.table, STORE).map_err(AccountRepositoryError::unavailable)?;
        Ok(table.by_id.get(&id).cloned())
    }
}
