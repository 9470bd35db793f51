//! Port for menu persistence keyed by owner.

use async_trait::async_trait;

use crate::domain::{AccountId, Menu};

use super::define_port_error;

define_port_error! {
    /// Errors raised by menu repository adapters.
    pub enum MenuRepositoryError {
        /// The backing store could not serve the request.
        Unavailable { message: String } => "menu repository unavailable: {message}",
    }
}

/// Port owning menu records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Store a menu under its owner.
    async fn insert(&self, menu: &Menu) -> Result<(), MenuRepositoryError>;

    /// Menus whose owner equals `owner`, in insertion order.
    async fn list_for_owner(&self, owner: AccountId) -> Result<Vec<Menu>, MenuRepositoryError>;
}
