//! Bearer token extraction.
//!
//! Handlers take a [`BearerToken`] and hand it to the authorization port
//! unchanged; whether a session is required is the domain's decision.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, SessionToken};

const BEARER_SCHEME: &str = "Bearer";

/// Session token presented in `Authorization: Bearer <token>`, if any.
///
/// Absent, non-UTF-8 or non-bearer headers all extract as "no token".
#[derive(Debug, Clone, Default)]
pub struct BearerToken(Option<SessionToken>);

impl BearerToken {
    /// Token to pass to the authorization port.
    pub fn as_token(&self) -> Option<&SessionToken> {
        self.0.as_ref()
    }

    fn from_header(raw: &str) -> Self {
        let Some((scheme, credentials)) = raw.trim().split_once(' ') else {
            return Self(None);
        };
        if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
            debug!(scheme, "ignoring non-bearer authorization header");
            return Self(None);
        }
        Self(SessionToken::parse(credentials))
    }
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(Self::from_header)
            .unwrap_or_default();
        ready(Ok(token))
    }
}
