//! Menu data model.
//!
//! The core treats menu entries as opaque payloads; it only cares who owns
//! a menu.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::account::AccountId;

/// Maximum menu name length in characters.
pub const MENU_NAME_MAX: usize = 120;

/// Validation errors returned when building menu values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuValidationError {
    /// Name was blank once trimmed.
    EmptyName,
    /// Name exceeded [`MENU_NAME_MAX`] characters.
    NameTooLong {
        /// Permitted maximum.
        max: usize,
    },
}

impl fmt::Display for MenuValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "menu name must not be empty"),
            Self::NameTooLong { max } => write!(f, "menu name must be at most {max} characters"),
        }
    }
}

impl std::error::Error for MenuValidationError {}

/// Stable menu identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuId(Uuid);

impl MenuId {
    /// Generate a new random [`MenuId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trimmed, non-empty menu name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MenuName(String);

impl MenuName {
    /// Validate and construct a [`MenuName`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, MenuValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MenuValidationError::EmptyName);
        }
        if trimmed.chars().count() > MENU_NAME_MAX {
            return Err(MenuValidationError::NameTooLong { max: MENU_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for MenuName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<MenuName> for String {
    fn from(value: MenuName) -> Self {
        value.0
    }
}

impl TryFrom<String> for MenuName {
    type Error = MenuValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Opaque menu entry payload owned by menu-management collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MenuEntry(Value);

impl MenuEntry {
    /// Wrap an arbitrary JSON payload.
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    /// Borrow the payload.
    pub fn payload(&self) -> &Value {
        &self.0
    }
}

/// A menu with exactly one owner.
///
/// ## Invariants
/// - `owner` is fixed at creation.
/// - `entries` keep the order they were supplied in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    id: MenuId,
    owner: AccountId,
    name: MenuName,
    entries: Vec<MenuEntry>,
    created_at: DateTime<Utc>,
}

impl Menu {
    /// Build a menu from validated parts.
    pub fn new(
        id: MenuId,
        owner: AccountId,
        name: MenuName,
        entries: Vec<MenuEntry>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            name,
            entries,
            created_at,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> MenuId {
        self.id
    }

    /// Owning account.
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Display name.
    pub fn name(&self) -> &MenuName {
        &self.name
    }

    /// Ordered entries.
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Summary used in listings.
    pub fn summary(&self) -> MenuSummary {
        MenuSummary {
            id: self.id,
            name: self.name.clone(),
            entry_count: self.entries.len(),
        }
    }
}

/// Listing projection of a [`Menu`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSummary {
    /// Stable identifier.
    pub id: MenuId,
    /// Display name.
    pub name: MenuName,
    /// Number of entries in the menu.
    pub entry_count: usize,
}
