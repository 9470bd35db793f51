//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the driving port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::AuthorizationService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub authorization: Arc<dyn AuthorizationService>,
}

impl HttpState {
    /// Construct state from the authorization port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use actix_web::web;
    /// use menuplan::inbound::http::state::HttpState;
    /// use menuplan::test_support::in_memory_authorization;
    /// use menuplan::domain::SessionPolicy;
    ///
    /// let harness = in_memory_authorization(SessionPolicy::never_expire());
    /// let state = web::Data::new(HttpState::new(Arc::new(harness.service)));
    /// let _authorization = state.authorization.clone();
    /// ```
    pub fn new(authorization: Arc<dyn AuthorizationService>) -> Self {
        Self { authorization }
    }
}
