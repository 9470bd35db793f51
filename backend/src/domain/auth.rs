//! Authentication primitives such as sign-in credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use super::account::{AccountValidationError, Email};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email was present but not shaped like an address.
    MalformedEmail,
    /// Secret was blank.
    EmptySecret,
}

impl CredentialsValidationError {
    /// Field name the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyEmail | Self::MalformedEmail => "email",
            Self::EmptySecret => "secret",
        }
    }

    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyEmail => "empty_email",
            Self::MalformedEmail => "malformed_email",
            Self::EmptySecret => "empty_secret",
        }
    }
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::MalformedEmail => write!(f, "email must look like name@domain"),
            Self::EmptySecret => write!(f, "secret must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

impl From<AccountValidationError> for CredentialsValidationError {
    fn from(value: AccountValidationError) -> Self {
        match value {
            AccountValidationError::EmptyEmail => Self::EmptyEmail,
            AccountValidationError::MalformedEmail => Self::MalformedEmail,
        }
    }
}

/// Validated credentials used by sign-up and sign-in.
///
/// ## Invariants
/// - `email` is normalised (see [`Email`]).
/// - `secret` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons. It is wiped from memory on drop.
///
/// # Examples
/// ```
/// use menuplan::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("Ada@Example.com", "pw").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.secret(), "pw");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    secret: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw email/secret inputs.
    ///
    /// Blank fields are reported before the email shape is checked.
    pub fn try_from_parts(email: &str, secret: &str) -> Result<Self, CredentialsValidationError> {
        if email.trim().is_empty() {
            return Err(CredentialsValidationError::EmptyEmail);
        }
        if secret.is_empty() {
            return Err(CredentialsValidationError::EmptySecret);
        }
        let email = Email::parse(email)?;

        Ok(Self {
            email,
            secret: Zeroizing::new(secret.to_owned()),
        })
    }

    /// Normalised email suitable for account lookups.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Secret provided by the caller.
    pub fn secret(&self) -> &str {
        self.secret.as_str()
    }

    /// Owned copy of the secret that is wiped when dropped.
    pub(crate) fn secret_copy(&self) -> Zeroizing<String> {
        self.secret.clone()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("secret", &"<redacted>")
            .finish()
    }
}
