//! Credential store: account creation, lookup and secret verification.
//!
//! Secrets are hashed with Argon2id and a fresh random salt. Hashing and
//! verification are CPU-bound, so both run on Tokio's blocking pool.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use mockable::Clock;
use thiserror::Error;
use tracing::{error, info};
use zeroize::Zeroizing;

use super::ports::AccountRepository;
use super::store_errors::map_account_error;
use super::{Account, AccountId, Credentials, Email, Error, NewAccount, SecretHash};

/// Failure inside the hashing primitive itself.
#[derive(Debug, Error)]
#[error("secret hashing failed: {0}")]
pub struct SecretHashError(#[from] password_hash::Error);

/// Salted one-way hasher for account secrets.
///
/// # Examples
/// ```
/// use argon2::Params;
/// use menuplan::domain::SecretHasher;
///
/// let hasher = SecretHasher::new(Params::new(8, 1, 1, None).unwrap());
/// let hash = hasher.hash("pw1").unwrap();
/// assert!(hasher.verify("pw1", &hash).unwrap());
/// assert!(!hasher.verify("pw2", &hash).unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SecretHasher {
    params: Params,
}

impl SecretHasher {
    /// Hasher using explicit Argon2id cost parameters.
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash `secret` with a fresh salt.
    pub fn hash(&self, secret: &str) -> Result<SecretHash, SecretHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self.argon2().hash_password(secret.as_bytes(), &salt)?;
        Ok(SecretHash::from_phc(encoded.to_string()))
    }

    /// Check `candidate` against `hash`.
    ///
    /// The verifier recomputes the digest with the parameters stored in the
    /// hash and compares digests in constant time.
    pub fn verify(&self, candidate: &str, hash: &SecretHash) -> Result<bool, SecretHashError> {
        let parsed = PasswordHash::new(hash.as_phc())?;
        match self.argon2().verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(other) => Err(other.into()),
        }
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, Error>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|err| {
        error!(error = %err, "secret hashing task failed");
        Error::internal("secret hashing task failed")
    })
}

fn map_hash_error(err: SecretHashError) -> Error {
    error!(error = %err, "secret hashing failed");
    Error::internal("secret hashing failed")
}

/// Domain service owning account records.
#[derive(Clone)]
pub struct CredentialStore {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<SecretHasher>,
    clock: Arc<dyn Clock>,
}

impl CredentialStore {
    /// Create a store over an account repository.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: SecretHasher,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            hasher: Arc::new(hasher),
            clock,
        }
    }

    /// Create an account for validated credentials.
    ///
    /// # Errors
    /// `DuplicateEmail` when the normalised email is taken, including when a
    /// concurrent request wins the race; `StoreUnavailable` on store
    /// failure.
    pub async fn create_account(&self, credentials: &Credentials) -> Result<Account, Error> {
        // Cheap early exit; the repository insert remains the authority.
        if self.find_by_email(credentials.email()).await?.is_some() {
            return Err(Error::duplicate_email());
        }

        let secret_hash = self.hash_secret(credentials.secret_copy()).await?;
        let account = self
            .accounts
            .insert_new(NewAccount {
                email: credentials.email().clone(),
                secret_hash,
                created_at: self.clock.utc(),
            })
            .await
            .map_err(map_account_error)?;

        info!(account_id = %account.id(), "account created");
        Ok(account)
    }

    /// Case-insensitive lookup by email. No side effects.
    pub async fn find_by_email(&self, email: &Email) -> Result<Option<Account>, Error> {
        self.accounts
            .find_by_email(email)
            .await
            .map_err(map_account_error)
    }

    /// Lookup by id.
    pub async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, Error> {
        self.accounts.find_by_id(id).await.map_err(map_account_error)
    }

    /// Constant-time check of `candidate` against the account's stored hash.
    pub async fn verify_secret(&self, account: &Account, candidate: &str) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let candidate = Zeroizing::new(candidate.to_owned());
        let hash = account.secret_hash().clone();
        run_blocking(move || hasher.verify(candidate.as_str(), &hash))
            .await?
            .map_err(map_hash_error)
    }

    /// Return the account iff the credentials identify it.
    ///
    /// Unknown emails still pay for one Argon2 computation so both failure
    /// paths take comparable time.
    pub async fn verify_login(&self, credentials: &Credentials) -> Result<Option<Account>, Error> {
        match self.find_by_email(credentials.email()).await? {
            Some(account) => {
                let verified = self.verify_secret(&account, credentials.secret()).await?;
                Ok(verified.then_some(account))
            }
            None => {
                self.hash_secret(credentials.secret_copy()).await?;
                Ok(None)
            }
        }
    }

    async fn hash_secret(&self, secret: Zeroizing<String>) -> Result<SecretHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        run_blocking(move || hasher.hash(secret.as_str()))
            .await?
            .map_err(map_hash_error)
    }
}
