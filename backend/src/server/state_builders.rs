//! Builders wiring domain services over their outbound adapters.

use std::sync::Arc;

use actix_web::web;
use argon2::Params;
use mockable::DefaultClock;

use menuplan::domain::{
    AuthorizationFacade, CredentialStore, MenuOwnershipIndex, SecretHasher, SessionManager,
    SessionPolicy,
};
use menuplan::inbound::http::state::HttpState;
use menuplan::outbound::memory::InMemoryStores;

/// Services the server needs beyond the HTTP state.
pub(crate) struct AppServices {
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) sessions: Arc<SessionManager>,
}

/// Wire the authorization facade over fresh in-memory stores.
pub(crate) fn build_services(session_policy: SessionPolicy) -> AppServices {
    let stores = InMemoryStores::default();
    let clock = Arc::new(DefaultClock);
    let credentials = Arc::new(CredentialStore::new(
        stores.accounts.clone(),
        SecretHasher::new(Params::default()),
        clock.clone(),
    ));
    let sessions = Arc::new(SessionManager::new(
        stores.sessions.clone(),
        stores.accounts.clone(),
        clock.clone(),
        session_policy,
    ));
    let menus = Arc::new(MenuOwnershipIndex::new(stores.menus.clone(), clock));
    let facade = AuthorizationFacade::new(credentials, Arc::clone(&sessions), menus);

    AppServices {
        http_state: web::Data::new(HttpState::new(Arc::new(facade))),
        sessions,
    }
}
