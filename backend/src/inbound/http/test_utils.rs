//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use crate::domain::SessionPolicy;
use crate::inbound::http::accounts::SignUpResponse;
use crate::inbound::http::api_scope;
use crate::inbound::http::state::HttpState;
use crate::test_support::in_memory_authorization;

/// Build the API over fresh in-memory stores with non-expiring sessions.
pub fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let harness = in_memory_authorization(SessionPolicy::never_expire());
    App::new()
        .app_data(web::Data::new(HttpState::new(Arc::new(harness.service))))
        .service(api_scope())
}

/// `Authorization` header carrying `token`.
pub fn bearer(token: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {token}"))
}

/// POST a JSON body and return the response.
pub async fn post_json<S, B>(app: &S, uri: &str, body: Value) -> ServiceResponse<B>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

/// Create an account and return its session token.
pub async fn sign_up<S, B>(app: &S, email: &str, secret: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = post_json(
        app,
        "/api/v1/accounts",
        json!({"email": email, "secret": secret}),
    )
    .await;
    let body: SignUpResponse = actix_test::read_body_json(response).await;
    body.session_token
}
