//! Account, session and menu-ownership core for the menu planning service.
//!
//! The crate follows a hexagonal layout: [`domain`] holds value types,
//! services and ports; [`outbound`] implements the driven ports; [`inbound`]
//! exposes the driving port over HTTP.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
