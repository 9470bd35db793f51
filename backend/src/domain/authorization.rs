//! Authorization facade: the single entry point for inbound adapters.
//!
//! Composes the credential store, session manager and menu ownership index
//! behind [`AuthorizationService`]. Raw request input is validated here, so
//! the services below only ever see domain types.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use super::ports::{AuthorizationService, MenuDraft, SignUpOutcome};
use super::{
    Credentials, CredentialsValidationError, CredentialStore, Error, Menu, MenuOwnershipIndex,
    SessionManager, SessionPrincipal, SessionToken,
};

/// Facade implementing the [`AuthorizationService`] driving port.
///
/// The facade holds shared references to its collaborators; the same
/// session manager may back several facades.
#[derive(Clone)]
pub struct AuthorizationFacade {
    credentials: Arc<CredentialStore>,
    sessions: Arc<SessionManager>,
    menus: Arc<MenuOwnershipIndex>,
}

impl AuthorizationFacade {
    /// Compose a facade from its services.
    pub fn new(
        credentials: Arc<CredentialStore>,
        sessions: Arc<SessionManager>,
        menus: Arc<MenuOwnershipIndex>,
    ) -> Self {
        Self {
            credentials,
            sessions,
            menus,
        }
    }
}

fn map_validation_error(err: CredentialsValidationError) -> Error {
    Error::invalid_input(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

fn missing_session() -> Error {
    Error::unauthenticated("a valid session is required")
}

#[async_trait]
impl AuthorizationService for AuthorizationFacade {
    async fn sign_up(&self, email: &str, secret: &str) -> Result<SignUpOutcome, Error> {
        let credentials =
            Credentials::try_from_parts(email, secret).map_err(map_validation_error)?;
        let account = self.credentials.create_account(&credentials).await?;
        let session_token = self.sessions.create_session(&account).await?;
        Ok(SignUpOutcome {
            account: account.view(),
            session_token,
        })
    }

    async fn authenticate(&self, email: &str, secret: &str) -> Result<SessionToken, Error> {
        let credentials = Credentials::try_from_parts(email, secret).map_err(|err| match err {
            // A malformed address can never match an account.
            CredentialsValidationError::MalformedEmail => Error::invalid_credentials(),
            other => map_validation_error(other),
        })?;

        let Some(account) = self.credentials.verify_login(&credentials).await? else {
            debug!("authentication rejected");
            return Err(Error::invalid_credentials());
        };
        let token = self.sessions.create_session(&account).await?;
        info!(account_id = %account.id(), "account authenticated");
        Ok(token)
    }

    async fn require_session(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<SessionPrincipal, Error> {
        let token = token.ok_or_else(missing_session)?;
        self.sessions
            .resolve_session(token)
            .await?
            .ok_or_else(missing_session)
    }

    async fn list_owned_menus(&self, token: Option<&SessionToken>) -> Result<Vec<Menu>, Error> {
        let principal = self.require_session(token).await?;
        self.menus.menus_for_account(&principal).await
    }

    async fn create_owned_menu(
        &self,
        token: Option<&SessionToken>,
        draft: MenuDraft,
    ) -> Result<Menu, Error> {
        let principal = self.require_session(token).await?;
        self.menus.record_menu(&principal, draft).await
    }

    async fn sign_out(&self, token: Option<&SessionToken>) -> Result<(), Error> {
        match token {
            Some(token) => self.sessions.invalidate_session(token).await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests;
