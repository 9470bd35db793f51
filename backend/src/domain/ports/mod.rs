//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to reach its stores. Each
//! trait exposes strongly typed errors so adapters map their failures into
//! predictable variants instead of returning `anyhow::Result`. The driving
//! port is what inbound adapters call.

mod macros;

pub(crate) use macros::define_port_error;

mod account_repository;
mod authorization_service;
mod menu_repository;
mod session_repository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
pub use authorization_service::{AuthorizationService, MenuDraft, SignUpOutcome};
#[cfg(test)]
pub use menu_repository::MockMenuRepository;
pub use menu_repository::{MenuRepository, MenuRepositoryError};
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{SessionRepository, SessionRepositoryError};
