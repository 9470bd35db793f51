//! In-memory menu repository partitioned by owner.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{MenuRepository, MenuRepositoryError};
use crate::domain::{AccountId, Menu};

use super::{read, write};

const STORE: &str = "menus";

/// Menu store. Each owner's menus stay in insertion order.
#[derive(Default)]
pub struct InMemoryMenuRepository {
    by_owner: RwLock<HashMap<AccountId, Vec<Menu>>>,
}

impl InMemoryMenuRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuRepository {
    async fn insert(&self, menu: &Menu) -> Result<(), MenuRepositoryError> {
        let mut by_owner = write(&self.by_owner, STORE).map_err(MenuRepositoryError::unavailable)?;
        by_owner.entry(menu.owner()).or_default().push(menu.clone());
        Ok(())
    }

    async fn list_for_owner(&self, owner: AccountId) -> Result<Vec<Menu>, MenuRepositoryError> {
        let by_owner = read(&self.by_owner, STORE).map_err(MenuRepositoryError::unavailable)?;
        Ok(by_owner.get(&owner).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory menu repository.
    use super::*;
    use crate::domain::{MenuId, MenuName};
    use crate::test_support::fixed_now;
    use rstest::rstest;

    fn menu(owner: u64, name: &str) -> Menu {
        Menu::new(
            MenuId::random(),
            AccountId::new(owner),
            MenuName::new(name).expect("valid name"),
            Vec::new(),
            fixed_now(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn lists_only_the_owners_menus_in_order() {
        let repository = InMemoryMenuRepository::new();
        for stored in [menu(1, "First"), menu(2, "Other"), menu(1, "Second")] {
            repository.insert(&stored).await.expect("insert");
        }

        let names: Vec<String> = repository
            .list_for_owner(AccountId::new(1))
            .await
            .expect("list")
            .iter()
            .map(|menu| menu.name().as_ref().to_owned())
            .collect();
        assert_eq!(names, ["First", "Second"]);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_owner_has_no_menus() {
        let repository = InMemoryMenuRepository::new();
        let menus = repository
            .list_for_owner(AccountId::new(42))
            .await
            .expect("list");
        assert!(menus.is_empty());
    }
}
