//! Menu ownership index.
//!
//! Every read and write is keyed by a [`SessionPrincipal`], which only the
//! session manager can produce. There is no way to ask for another
//! account's menus by id.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::{debug, warn};

use super::ports::{MenuDraft, MenuRepository};
use super::store_errors::map_menu_error;
use super::{Error, Menu, MenuId, MenuName, MenuValidationError, SessionPrincipal};

/// Domain service scoping menus to their owners.
#[derive(Clone)]
pub struct MenuOwnershipIndex {
    menus: Arc<dyn MenuRepository>,
    clock: Arc<dyn Clock>,
}

impl MenuOwnershipIndex {
    /// Create an index over a menu repository.
    pub fn new(menus: Arc<dyn MenuRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { menus, clock }
    }

    /// Menus owned by the principal's account, in insertion order.
    pub async fn menus_for_account(&self, principal: &SessionPrincipal) -> Result<Vec<Menu>, Error> {
        let owner = principal.account_id();
        let menus = self
            .menus
            .list_for_owner(owner)
            .await
            .map_err(map_menu_error)?;

        let total = menus.len();
        let owned: Vec<Menu> = menus.into_iter().filter(|menu| menu.owner() == owner).collect();
        if owned.len() != total {
            warn!(account_id = %owner, dropped = total - owned.len(), "foreign menus filtered");
        }
        Ok(owned)
    }

    /// Store a new menu owned by the principal's account.
    ///
    /// # Errors
    /// `InvalidInput` when the draft name is blank or too long;
    /// `StoreUnavailable` on store failure.
    pub async fn record_menu(
        &self,
        principal: &SessionPrincipal,
        draft: MenuDraft,
    ) -> Result<Menu, Error> {
        let name = MenuName::new(&draft.name).map_err(map_menu_validation_error)?;
        let menu = Menu::new(
            MenuId::random(),
            principal.account_id(),
            name,
            draft.entries,
            self.clock.utc(),
        );
        self.menus.insert(&menu).await.map_err(map_menu_error)?;
        debug!(account_id = %menu.owner(), menu_id = %menu.id(), "menu recorded");
        Ok(menu)
    }
}

fn map_menu_validation_error(err: MenuValidationError) -> Error {
    let code = match err {
        MenuValidationError::EmptyName => "empty_name",
        MenuValidationError::NameTooLong { .. } => "name_too_long",
    };
    Error::invalid_input(err.to_string()).with_details(json!({ "field": "name", "code": code }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the ownership index.
    use super::*;
    use crate::domain::ports::{MenuRepositoryError, MockMenuRepository};
    use crate::domain::{Account, AccountId, Email, ErrorCode, MenuEntry, NewAccount, SecretHash};
    use crate::test_support::fixed_clock;
    use rstest::rstest;

    fn principal(id: u64) -> SessionPrincipal {
        SessionPrincipal::new(Account::new(
            AccountId::new(id),
            NewAccount {
                email: Email::parse(format!("user{id}@x.com")).expect("valid email"),
                secret_hash: SecretHash::from_phc("$argon2id$stub"),
                created_at: fixed_clock().utc(),
            },
        ))
    }

    fn menu_for(owner: u64, name: &str) -> Menu {
        Menu::new(
            MenuId::random(),
            AccountId::new(owner),
            MenuName::new(name).expect("valid name"),
            Vec::new(),
            fixed_clock().utc(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn lists_by_principal_account() {
        let mut repository = MockMenuRepository::new();
        repository
            .expect_list_for_owner()
            .withf(|owner| *owner == AccountId::new(2))
            .returning(|_| Ok(vec![menu_for(2, "Week 1"), menu_for(2, "Week 2")]));

        let index = MenuOwnershipIndex::new(Arc::new(repository), fixed_clock());
        let menus = index
            .menus_for_account(&principal(2))
            .await
            .expect("listing succeeds");
        let names: Vec<&str> = menus.iter().map(|menu| menu.name().as_ref()).collect();
        assert_eq!(names, ["Week 1", "Week 2"]);
    }

    #[rstest]
    #[tokio::test]
    async fn drops_menus_the_adapter_should_not_have_returned() {
        let mut repository = MockMenuRepository::new();
        repository
            .expect_list_for_owner()
            .returning(|_| Ok(vec![menu_for(1, "Mine"), menu_for(9, "Theirs")]));

        let index = MenuOwnershipIndex::new(Arc::new(repository), fixed_clock());
        let menus = index
            .menus_for_account(&principal(1))
            .await
            .expect("listing succeeds");
        assert_eq!(menus.len(), 1);
        assert!(menus.iter().all(|menu| menu.owner() == AccountId::new(1)));
    }

    #[rstest]
    #[tokio::test]
    async fn records_menus_for_the_principal() {
        let mut repository = MockMenuRepository::new();
        repository
            .expect_insert()
            .withf(|menu| menu.owner() == AccountId::new(3) && menu.entries().len() == 1)
            .times(1)
            .returning(|_| Ok(()));

        let index = MenuOwnershipIndex::new(Arc::new(repository), fixed_clock());
        let draft = MenuDraft {
            name: "  Sunday roast ".to_owned(),
            entries: vec![MenuEntry::new(json!({"dish": "roast"}))],
        };
        let menu = index
            .record_menu(&principal(3), draft)
            .await
            .expect("menu recorded");
        assert_eq!(menu.name().as_ref(), "Sunday roast");
        assert_eq!(menu.created_at(), fixed_clock().utc());
    }

    #[rstest]
    #[case("", "empty_name")]
    #[case("   ", "empty_name")]
    #[tokio::test]
    async fn rejects_blank_names(#[case] name: &str, #[case] code: &str) {
        let mut repository = MockMenuRepository::new();
        repository.expect_insert().never();

        let index = MenuOwnershipIndex::new(Arc::new(repository), fixed_clock());
        let draft = MenuDraft {
            name: name.to_owned(),
            entries: Vec::new(),
        };
        let err = index
            .record_menu(&principal(1), draft)
            .await
            .expect_err("blank name rejected");
        assert_eq!(err.code(), ErrorCode::InvalidInput);
        assert_eq!(err.details(), Some(&json!({"field": "name", "code": code})));
    }

    #[rstest]
    #[tokio::test]
    async fn store_failures_are_store_unavailable() {
        let mut repository = MockMenuRepository::new();
        repository
            .expect_list_for_owner()
            .returning(|_| Err(MenuRepositoryError::unavailable("gone")));

        let index = MenuOwnershipIndex::new(Arc::new(repository), fixed_clock());
        let err = index
            .menus_for_account(&principal(1))
            .await
            .expect_err("failure surfaces");
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    }
}
