//! Behaviour coverage for the authorization facade over in-memory stores.

use std::time::Duration;

use rstest::rstest;
use rstest_bdd_macros::{given, then};
use serde_json::json;

use super::*;
use crate::domain::ports::SessionRepository;
use crate::domain::{AccountId, ErrorCode, MenuEntry, SessionPolicy};
use crate::test_support::{InMemoryAuthorization, in_memory_authorization};

#[given("a service with no accounts")]
fn a_service_with_no_accounts() -> InMemoryAuthorization {
    in_memory_authorization(SessionPolicy::never_expire())
}

#[given("a service whose sessions expire after an hour")]
fn a_service_whose_sessions_expire_after_an_hour() -> InMemoryAuthorization {
    in_memory_authorization(SessionPolicy::fixed(Duration::from_secs(3600)).expect("valid ttl"))
}

#[then("the request is rejected as unauthenticated")]
fn the_request_is_rejected_as_unauthenticated(err: Error) {
    assert_eq!(err.code(), ErrorCode::Unauthenticated);
}

#[then("the input is rejected as invalid")]
fn the_input_is_rejected_as_invalid(err: Error) {
    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

fn rejected<T: std::fmt::Debug>(result: Result<T, Error>) -> Error {
    result.expect_err("request must be rejected")
}

async fn signed_up(service: &AuthorizationFacade, email: &str, secret: &str) -> SignUpOutcome {
    service.sign_up(email, secret).await.expect("sign-up succeeds")
}

fn draft(name: &str) -> MenuDraft {
    MenuDraft {
        name: name.to_owned(),
        entries: vec![MenuEntry::new(json!({"dish": "soup"}))],
    }
}

#[rstest]
#[tokio::test]
async fn sign_up_opens_a_session_for_the_new_account() {
    let harness = a_service_with_no_accounts();
    let outcome = signed_up(&harness.service, "A@X.com", "pw1").await;

    assert_eq!(outcome.account.id, AccountId::new(1));
    assert_eq!(outcome.account.email.as_ref(), "a@x.com");
    let principal = harness
        .service
        .require_session(Some(&outcome.session_token))
        .await
        .expect("session resolves");
    assert_eq!(principal.account_id(), AccountId::new(1));
}

#[rstest]
#[case("", "pw1", "email", "empty_email")]
#[case("   ", "pw1", "email", "empty_email")]
#[case("a@x.com", "", "secret", "empty_secret")]
#[case("not-an-email", "pw1", "email", "malformed_email")]
#[tokio::test]
async fn sign_up_rejects_invalid_input(
    #[case] email: &str,
    #[case] secret: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let harness = a_service_with_no_accounts();
    let err = rejected(harness.service.sign_up(email, secret).await);
    assert_eq!(err.details(), Some(&json!({ "field": field, "code": code })));
    the_input_is_rejected_as_invalid(err);
}

#[rstest]
#[tokio::test]
async fn sign_up_rejects_an_email_differing_only_in_case() {
    let harness = a_service_with_no_accounts();
    signed_up(&harness.service, "a@x.com", "pw1").await;

    let err = harness
        .service
        .sign_up("A@X.COM", "pw2")
        .await
        .expect_err("duplicate rejected");
    assert_eq!(err.code(), ErrorCode::DuplicateEmail);
}

#[rstest]
#[tokio::test]
async fn authentication_failures_are_indistinguishable() {
    let harness = a_service_with_no_accounts();
    signed_up(&harness.service, "a@x.com", "pw1").await;

    let wrong_secret = harness
        .service
        .authenticate("a@x.com", "pw2")
        .await
        .expect_err("wrong secret rejected");
    let unknown_email = harness
        .service
        .authenticate("b@x.com", "pw1")
        .await
        .expect_err("unknown email rejected");
    let malformed = harness
        .service
        .authenticate("nobody", "pw1")
        .await
        .expect_err("malformed email rejected");

    assert_eq!(wrong_secret, unknown_email);
    assert_eq!(wrong_secret, malformed);
    assert_eq!(wrong_secret.code(), ErrorCode::InvalidCredentials);
}

#[rstest]
#[case("", "pw1", "email", "empty_email")]
#[case("a@x.com", "", "secret", "empty_secret")]
#[tokio::test]
async fn authenticate_rejects_blank_fields(
    #[case] email: &str,
    #[case] secret: &str,
    #[case] field: &str,
    #[case] code: &str,
) {
    let harness = a_service_with_no_accounts();
    let err = rejected(harness.service.authenticate(email, secret).await);
    assert_eq!(err.details(), Some(&json!({ "field": field, "code": code })));
    the_input_is_rejected_as_invalid(err);
}

#[rstest]
#[tokio::test]
async fn each_authentication_opens_an_independent_session() {
    let harness = a_service_with_no_accounts();
    let outcome = signed_up(&harness.service, "a@x.com", "pw1").await;
    let first = harness
        .service
        .authenticate(" A@x.com ", "pw1")
        .await
        .expect("login succeeds");
    let second = harness
        .service
        .authenticate("a@x.com", "pw1")
        .await
        .expect("login succeeds");

    assert_ne!(first, second);
    assert_ne!(first, outcome.session_token);

    harness
        .service
        .sign_out(Some(&first))
        .await
        .expect("sign-out succeeds");
    let first_after = harness.service.require_session(Some(&first)).await;
    the_request_is_rejected_as_unauthenticated(rejected(first_after));
    assert!(harness.service.require_session(Some(&second)).await.is_ok());
}

#[rstest]
#[tokio::test]
async fn missing_and_unknown_tokens_are_unauthenticated() {
    let harness = a_service_with_no_accounts();
    the_request_is_rejected_as_unauthenticated(rejected(harness.service.require_session(None).await));

    let unknown = SessionToken::parse("deadbeef").expect("non-empty token");
    the_request_is_rejected_as_unauthenticated(rejected(
        harness.service.list_owned_menus(Some(&unknown)).await,
    ));
}

#[rstest]
#[tokio::test]
async fn sign_out_is_idempotent() {
    let harness = a_service_with_no_accounts();
    let outcome = signed_up(&harness.service, "a@x.com", "pw1").await;
    let token = Some(&outcome.session_token);

    assert!(harness.service.sign_out(token).await.is_ok());
    assert!(harness.service.sign_out(token).await.is_ok());
    assert!(harness.service.sign_out(None).await.is_ok());
    the_request_is_rejected_as_unauthenticated(rejected(harness.service.require_session(token).await));
}

#[rstest]
#[tokio::test]
async fn menus_are_scoped_to_their_owner() {
    let harness = a_service_with_no_accounts();
    let ada = signed_up(&harness.service, "ada@x.com", "pw1").await;
    let bob = signed_up(&harness.service, "bob@x.com", "pw2").await;

    harness
        .service
        .create_owned_menu(Some(&ada.session_token), draft("Ada's week"))
        .await
        .expect("menu stored");

    let ada_menus = harness
        .service
        .list_owned_menus(Some(&ada.session_token))
        .await
        .expect("listing succeeds");
    let bob_menus = harness
        .service
        .list_owned_menus(Some(&bob.session_token))
        .await
        .expect("listing succeeds");

    assert_eq!(ada_menus.len(), 1);
    assert!(ada_menus.iter().all(|menu| menu.owner() == ada.account.id));
    assert!(bob_menus.is_empty());
}

#[rstest]
#[tokio::test]
async fn creating_a_menu_requires_a_session() {
    let harness = a_service_with_no_accounts();
    let result = harness.service.create_owned_menu(None, draft("Orphan")).await;
    the_request_is_rejected_as_unauthenticated(rejected(result));
}

#[rstest]
#[tokio::test]
async fn expired_sessions_are_rejected_and_removed() {
    let harness = a_service_whose_sessions_expire_after_an_hour();
    let outcome = signed_up(&harness.service, "a@x.com", "pw1").await;
    let token = Some(&outcome.session_token);

    harness.clock.advance_seconds(3599);
    assert!(harness.service.require_session(token).await.is_ok());

    harness.clock.advance_seconds(1);
    the_request_is_rejected_as_unauthenticated(rejected(harness.service.require_session(token).await));
    let stored = harness
        .stores
        .sessions
        .find(&outcome.session_token.fingerprint())
        .await
        .expect("lookup succeeds");
    assert!(stored.is_none());
}

#[rstest]
#[tokio::test]
async fn sliding_sessions_stay_alive_while_used() {
    let harness = in_memory_authorization(
        SessionPolicy::sliding(Duration::from_secs(60)).expect("valid ttl"),
    );
    let outcome = signed_up(&harness.service, "a@x.com", "pw1").await;
    let token = Some(&outcome.session_token);

    for _ in 0..5 {
        harness.clock.advance_seconds(45);
        assert!(harness.service.require_session(token).await.is_ok());
    }

    harness.clock.advance_seconds(60);
    the_request_is_rejected_as_unauthenticated(rejected(harness.service.require_session(token).await));
}

#[rstest]
#[tokio::test]
async fn sweeping_reclaims_sessions_nobody_resolves() {
    let harness = a_service_whose_sessions_expire_after_an_hour();
    signed_up(&harness.service, "a@x.com", "pw1").await;
    signed_up(&harness.service, "b@x.com", "pw2").await;

    assert_eq!(harness.sessions.sweep_expired().await.expect("sweep"), 0);
    harness.clock.advance_seconds(3600);
    assert_eq!(harness.sessions.sweep_expired().await.expect("sweep"), 2);
}
