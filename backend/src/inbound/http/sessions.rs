//! Session API handlers.
//!
//! ```text
//! POST /api/v1/sessions {"email":"ada@example.com","secret":"pw1"}
//! DELETE /api/v1/sessions/current   (Authorization: Bearer <token>)
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};

use crate::inbound::http::ApiResult;
use crate::inbound::http::accounts::CredentialsRequest;
use crate::inbound::http::session::BearerToken;
use crate::inbound::http::state::HttpState;

/// Response body for a successful sign-in.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_token: String,
}

/// Verify credentials and open a new session.
#[post("/sessions")]
pub async fn authenticate(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let request = payload.into_inner();
    let token = state
        .authorization
        .authenticate(&request.email, &request.secret)
        .await?;
    Ok(web::Json(SessionResponse {
        session_token: token.expose().to_owned(),
    }))
}

/// End the session identified by the bearer token.
///
/// Always `204 No Content`, including when no live session matches.
#[delete("/sessions/current")]
pub async fn sign_out(state: web::Data<HttpState>, bearer: BearerToken) -> ApiResult<HttpResponse> {
    state.authorization.sign_out(bearer.as_token()).await?;
    Ok(HttpResponse::NoContent().finish())
}
