//! Port abstraction for account persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Account, AccountId, Email, NewAccount};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// An account with the same normalised email already exists.
        Duplicate { email: String } => "account already exists for {email}",
        /// The backing store could not serve the request.
        Unavailable { message: String } => "account repository unavailable: {message}",
    }
}

/// Port owning account records.
///
/// Adapters must treat [`AccountRepository::insert_new`] as one atomic
/// check-then-insert: of two concurrent inserts for the same email, exactly
/// one succeeds and the other reports [`AccountRepositoryError::Duplicate`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert an account unless its email is taken, assigning the next id.
    async fn insert_new(&self, account: NewAccount) -> Result<Account, AccountRepositoryError>;

    /// Look up an account by normalised email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, AccountRepositoryError>;

    /// Look up an account by id.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError>;
}
