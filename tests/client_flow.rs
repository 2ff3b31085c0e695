#![allow(clippy::unwrap_used, clippy::expect_used)]

use cutis::api;
use cutis::client::ApiClient;
use cutis::router::{Navigator, RouteTable, LOGIN_ROUTE, PATIENT_HOME};
use cutis::session::store::SessionStore;
use cutis::session::SessionContext;
use httpmock::prelude::*;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

struct TestContext {
    _dir: TempDir,
    session: Arc<SessionContext>,
    navigator: Arc<Navigator>,
    client: ApiClient,
}

fn build_context(base_url: &str) -> TestContext {
    let dir = TempDir::new().expect("tempdir");
    let store = SessionStore::new(dir.path().join("session.json"));
    let session = Arc::new(SessionContext::open(store).expect("open session"));
    let navigator = Arc::new(Navigator::new(RouteTable::default()));
    let client = ApiClient::new(base_url, Arc::clone(&session), Arc::clone(&navigator))
        .expect("build client");

    TestContext {
        _dir: dir,
        session,
        navigator,
        client,
    }
}

#[tokio::test]
async fn test_login_then_authorized_request() {
    let server = MockServer::start();

    let login = server.mock(|when, then| {
        when.method(POST)
            .path("/token/")
            .json_body(json!({"username": "ada", "password": "pw"}));
        then.status(200).json_body(json!({
            "access": "access-1",
            "refresh": "refresh-1",
            "role": "patient",
            "username": "ada",
            "id": "42"
        }));
    });

    let list = server.mock(|when, then| {
        when.method(GET)
            .path("/diagnosis_requests/")
            .header("authorization", "Bearer access-1");
        then.status(200)
            .json_body(json!([{"id": 1, "status": "pending"}]));
    });

    let context = build_context(&server.base_url());

    let password = SecretString::from("pw".to_string());
    let grant = api::auth::login(&context.client, "ada", &password)
        .await
        .expect("login");
    context.session.set_tokens(&grant).await.expect("set tokens");

    let session = context.session.snapshot().await;
    assert!(session.is_authenticated());
    assert_eq!(session.username.as_deref(), Some("ada"));
    assert_eq!(session.user_id.as_deref(), Some("42"));

    let requests = api::diagnosis::list(&context.client).await.expect("list");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].id, 1);

    login.assert();
    list.assert();
}

#[tokio::test]
async fn test_expired_access_is_refreshed_and_replayed() {
    let server = MockServer::start();

    let stale = server.mock(|when, then| {
        when.method(GET)
            .path("/diagnosis_requests/")
            .header("authorization", "Bearer stale");
        then.status(401).json_body(json!({"detail": "expired"}));
    });

    let refresh = server.mock(|when, then| {
        when.method(POST)
            .path("/token/refresh/")
            .json_body(json!({"refresh": "refresh-1"}));
        then.status(200).json_body(json!({"access": "fresh"}));
    });

    let replay = server.mock(|when, then| {
        when.method(GET)
            .path("/diagnosis_requests/")
            .header("authorization", "Bearer fresh");
        then.status(200).json_body(json!([]));
    });

    let context = build_context(&server.base_url());
    context
        .session
        .set_tokens(&cutis::session::TokenGrant {
            access: Some("stale".to_string()),
            refresh: Some("refresh-1".to_string()),
            role: None,
            username: None,
            user_id: None,
        })
        .await
        .expect("set tokens");

    let requests = api::diagnosis::list(&context.client).await.expect("list");
    assert!(requests.is_empty());

    stale.assert();
    refresh.assert();
    replay.assert();

    // The refreshed token replaces the stale one in the live session.
    let access = context.session.access().await.expect("access");
    assert_eq!(access.expose_secret(), "fresh");
}

#[tokio::test]
async fn test_failed_refresh_signs_the_session_out() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/diagnosis_requests/");
        then.status(401).json_body(json!({"detail": "expired"}));
    });

    server.mock(|when, then| {
        when.method(POST).path("/token/refresh/");
        then.status(401).json_body(json!({"detail": "refresh expired"}));
    });

    let context = build_context(&server.base_url());
    context
        .session
        .set_tokens(&cutis::session::TokenGrant {
            access: Some("stale".to_string()),
            refresh: Some("dead".to_string()),
            role: Some(cutis::session::Role::Patient),
            username: Some("ada".to_string()),
            user_id: Some("42".to_string()),
        })
        .await
        .expect("set tokens");

    let err = api::diagnosis::list(&context.client)
        .await
        .expect_err("request should fail");
    assert_eq!(err.status(), Some(401));

    // All five session fields are gone and the navigator sits on the login
    // page, so a guarded route bounces.
    let session = context.session.snapshot().await;
    assert!(!session.is_authenticated());
    assert!(session.role.is_none());
    assert!(session.username.is_none());
    assert_eq!(context.navigator.location().await, LOGIN_ROUTE);

    let outcome = context.navigator.navigate(PATIENT_HOME, &session).await;
    assert_eq!(outcome, cutis::router::Navigation::Redirect(LOGIN_ROUTE));
}
