//! Account data model.
//!
//! Accounts are created once and never mutated here. The secret hash stays
//! inside [`Account`]; callers outside the core only ever see
//! [`AccountView`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors returned when parsing account fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email did not have the `local@domain` shape.
    MalformedEmail,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::MalformedEmail => write!(f, "email must look like name@domain"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Store-assigned account identifier.
///
/// Identifiers come from a monotonically increasing sequence owned by the
/// account repository and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(u64);

impl AccountId {
    /// Wrap a raw sequence value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw sequence value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Case-normalised email address used as the account's unique key.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed and the value is lower-cased.
/// - Exactly one `@` separates a non-empty local part from a non-empty
///   domain, and no whitespace appears inside.
///
/// # Examples
/// ```
/// use menuplan::domain::Email;
///
/// let email = Email::parse("  Ada@Example.COM ").unwrap();
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise a raw email string.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(AccountValidationError::MalformedEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_lowercase()))
            }
            _ => Err(AccountValidationError::MalformedEmail),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Salted one-way hash of an account secret in PHC string format.
///
/// The hash is not serialisable and its `Debug` output is
/// redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretHash(String);

impl SecretHash {
    /// Wrap an encoded PHC string produced by the secret hasher.
    pub fn from_phc(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded PHC string, for verification and persistence only.
    pub fn as_phc(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SecretHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretHash(<redacted>)")
    }
}

/// Data required to insert a new account; the repository assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Normalised email, unique across accounts.
    pub email: Email,
    /// Hashed secret.
    pub secret_hash: SecretHash,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Registered account.
///
/// ## Invariants
/// - `id` never changes once assigned.
/// - `email` is unique across all accounts.
/// - `secret_hash` never holds plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    email: Email,
    secret_hash: SecretHash,
    created_at: DateTime<Utc>,
}

impl Account {
    /// Assemble an account from a stored row.
    pub fn new(id: AccountId, new_account: NewAccount) -> Self {
        let NewAccount {
            email,
            secret_hash,
            created_at,
        } = new_account;
        Self {
            id,
            email,
            secret_hash,
            created_at,
        }
    }

    /// Stable account identifier.
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Normalised email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored secret hash.
    pub fn secret_hash(&self) -> &SecretHash {
        &self.secret_hash
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Public projection safe to return to callers.
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id,
            email: self.email.clone(),
        }
    }
}

/// Public account view: identifier and email, never the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    /// Stable account identifier.
    pub id: AccountId,
    /// Normalised email.
    pub email: Email,
}
