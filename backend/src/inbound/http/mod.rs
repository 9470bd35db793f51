//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod error;
pub mod menus;
pub mod session;
pub mod sessions;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Request bodies larger than this are rejected before parsing.
const JSON_BODY_LIMIT: usize = 64 * 1024;

/// All API routes, mounted under `/api/v1`.
///
/// The caller registers [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use menuplan::inbound::http::api_scope;
///
/// let app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(
            web::JsonConfig::default()
                .limit(JSON_BODY_LIMIT)
                .error_handler(error::json_error_handler),
        )
        .service(accounts::sign_up)
        .service(sessions::authenticate)
        .service(sessions::sign_out)
        .service(menus::list_menus)
        .service(menus::create_menu)
}
