//! Mapping from driven-port failures to domain errors.
//!
//! Store failures are logged here with their adapter detail and replaced by
//! a generic message, so nothing about store internals reaches callers.

use tracing::error;

use super::Error;
use super::ports::{AccountRepositoryError, MenuRepositoryError, SessionRepositoryError};

pub(crate) fn map_account_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Duplicate { .. } => Error::duplicate_email(),
        AccountRepositoryError::Unavailable { message } => {
            error!(store = "accounts", %message, "store unavailable");
            Error::store_unavailable("account store unavailable")
        }
    }
}

pub(crate) fn map_session_error(error: SessionRepositoryError) -> Error {
    match error {
        SessionRepositoryError::Conflict => {
            error!(store = "sessions", "unexpected session fingerprint conflict");
            Error::internal("session store conflict")
        }
        SessionRepositoryError::Unavailable { message } => {
            error!(store = "sessions", %message, "store unavailable");
            Error::store_unavailable("session store unavailable")
        }
    }
}

pub(crate) fn map_menu_error(error: MenuRepositoryError) -> Error {
    match error {
        MenuRepositoryError::Unavailable { message } => {
            error!(store = "menus", %message, "store unavailable");
            Error::store_unavailable("menu store unavailable")
        }
    }
}
