//! Account API handlers.
//!
//! ```text
//! POST /api/v1/accounts {"email":"ada@example.com","secret":"pw1"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::AccountView;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/accounts` and `POST /api/v1/sessions`.
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    pub email: String,
    pub secret: String,
}

/// Response body for a successful sign-up.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub session_token: String,
    pub account: AccountView,
}

/// Create an account and open a session for it.
#[post("/accounts")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let request = payload.into_inner();
    let outcome = state
        .authorization
        .sign_up(&request.email, &request.secret)
        .await?;
    Ok(HttpResponse::Created().json(SignUpResponse {
        session_token: outcome.session_token.expose().to_owned(),
        account: outcome.account,
    }))
}
