//! Menu API handlers.
//!
//! ```text
//! GET /api/v1/menus                       (Authorization: Bearer <token>)
//! POST /api/v1/menus {"name":"Week 1","entries":[{"dish":"soup"}]}
//! ```
//!
//! Menus are always read and written for the account behind the bearer
//! token; no route accepts an owner id.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::MenuDraft;
use crate::domain::{MenuEntry, MenuSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::BearerToken;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/menus`.
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuRequest {
    pub name: String,
    #[serde(default)]
    pub entries: Vec<MenuEntry>,
}

impl From<CreateMenuRequest> for MenuDraft {
    fn from(value: CreateMenuRequest) -> Self {
        Self {
            name: value.name,
            entries: value.entries,
        }
    }
}

/// List summaries of the caller's menus.
#[get("/menus")]
pub async fn list_menus(
    state: web::Data<HttpState>,
    bearer: BearerToken,
) -> ApiResult<web::Json<Vec<MenuSummary>>> {
    let menus = state
        .authorization
        .list_owned_menus(bearer.as_token())
        .await?;
    Ok(web::Json(menus.iter().map(|menu| menu.summary()).collect()))
}

/// Store a menu owned by the caller.
#[post("/menus")]
pub async fn create_menu(
    state: web::Data<HttpState>,
    bearer: BearerToken,
    payload: web::Json<CreateMenuRequest>,
) -> ApiResult<HttpResponse> {
    let menu = state
        .authorization
        .create_owned_menu(bearer.as_token(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(menu.summary()))
}
