//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed entities for accounts, sessions and menus
//! and the services that enforce who may act on what. Keep types immutable
//! and document invariants and serialisation contracts (serde) in each
//! type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: failure payload and stable identifier.
//! - Account, Email, Credentials: identity and login input.
//! - SessionToken, Session, SessionPolicy, SessionPrincipal: session state.
//! - Menu, MenuSummary: owned planning documents.
//! - CredentialStore, SessionManager, MenuOwnershipIndex: domain services.
//! - AuthorizationFacade: implementation of the driving port.

pub mod account;
pub mod auth;
pub mod error;
pub mod menu;
pub mod ports;
pub mod session;

mod authorization;
mod credential_store;
mod menu_ownership;
mod session_manager;
mod store_errors;

pub use self::account::{
    Account, AccountId, AccountValidationError, AccountView, Email, NewAccount, SecretHash,
};
pub use self::auth::{Credentials, CredentialsValidationError};
pub use self::authorization::AuthorizationFacade;
pub use self::credential_store::{CredentialStore, SecretHashError, SecretHasher};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::menu::{
    MENU_NAME_MAX, Menu, MenuEntry, MenuId, MenuName, MenuSummary, MenuValidationError,
};
pub use self::menu_ownership::MenuOwnershipIndex;
pub use self::session::{
    Session, SessionPolicy, SessionPolicyError, SessionPrincipal, SessionStatus, SessionToken,
    TokenFingerprint,
};
pub use self::session_manager::SessionManager;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use menuplan::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthenticated("sign in first"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
