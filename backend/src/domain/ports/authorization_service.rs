//! Driving port for account, session and ownership-scoped use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it
//! without knowing (or importing) the backing stores. It is the only way
//! into the authorization core.

use async_trait::async_trait;

use crate::domain::{AccountView, Error, Menu, MenuEntry, SessionPrincipal, SessionToken};

/// Result of a successful sign-up: sign-up implies sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    /// Public view of the new account.
    pub account: AccountView,
    /// Token for the session opened on the caller's behalf.
    pub session_token: SessionToken,
}

/// Raw input for a new menu; ownership comes from the session.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuDraft {
    /// Requested display name.
    pub name: String,
    /// Ordered, opaque entries.
    pub entries: Vec<MenuEntry>,
}

/// Domain use-case port for authorization.
///
/// Operations that take a token accept `None` for "no token on the
/// request" and fail with `Unauthenticated` where a session is required.
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    /// Create an account and open a session for it.
    async fn sign_up(&self, email: &str, secret: &str) -> Result<SignUpOutcome, Error>;

    /// Verify credentials and open a session.
    async fn authenticate(&self, email: &str, secret: &str) -> Result<SessionToken, Error>;

    /// Resolve a token to the account it authorises.
    async fn require_session(&self, token: Option<&SessionToken>)
    -> Result<SessionPrincipal, Error>;

    /// Menus owned by the caller's account.
    async fn list_owned_menus(&self, token: Option<&SessionToken>) -> Result<Vec<Menu>, Error>;

    /// Store a new menu owned by the caller's account.
    async fn create_owned_menu(
        &self,
        token: Option<&SessionToken>,
        draft: MenuDraft,
    ) -> Result<Menu, Error>;

    /// End the caller's session. Missing or unknown tokens are a no-op.
    async fn sign_out(&self, token: Option<&SessionToken>) -> Result<(), Error>;
}
