//! Integration tests for the auth gateway

use chrono::{Duration, Utc};
use serde_json::{Value, json};
use ticketcore_client::{ApiRequest, AuthGateway, ClientError};
use ticketcore_core::access::{self, Destination, RouteDecision, RouteKind};
use ticketcore_core::{BootOutcome, Session, SessionBootstrap, SessionStore, TokenExpiry};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API: &str = "/ticketcore-api/api/v1";

fn api(suffix: &str) -> String {
    format!("{API}{suffix}")
}

fn expiry_body() -> Value {
    json!({
        "statusCode": 200,
        "message": "Token refreshed",
        "data": {
            "accessTokenExpiry": "2026-10-16T10:15:00Z",
            "refreshTokenExpiry": "2026-10-23T10:00:00Z"
        }
    })
}

fn gateway(server: &MockServer) -> AuthGateway {
    AuthGateway::builder()
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_every_request_carries_client_source() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/countries")))
        .and(header("x-client-source", "WEB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 200,
            "message": "ok",
            "data": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let envelope = gateway(&mock_server)
        .send::<Value>(ApiRequest::get("/countries"))
        .await
        .unwrap();
    assert_eq!(envelope.status_code, 200);
}

#[tokio::test]
async fn test_unauthorized_refreshes_once_and_retries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/users/me/profile")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "message": "Access token expired"
        })))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(api("/auth/refreshToken")))
        .respond_with(ResponseTemplate::new(200).set_body_json(expiry_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(api("/users/me/profile")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 200,
            "message": "ok",
            "data": {"userId": "u-1", "email": "ops@ticketcore.dev", "roles": ["ADMIN"]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    let profile = gateway.get_profile().await.unwrap();

    assert_eq!(profile.user_id, "u-1");
    assert!(gateway.session().is_authenticated());
}

#[tokio::test]
async fn test_embedded_unauthorized_also_refreshes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/venues")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 401,
            "message": "Unauthorized"
        })))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(api("/auth/refreshToken")))
        .respond_with(ResponseTemplate::new(200).set_body_json(expiry_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(api("/venues")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 200,
            "data": []
        })))
        .mount(&mock_server)
        .await;

    let result = gateway(&mock_server)
        .send::<Value>(ApiRequest::get("/venues"))
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_failed_refresh_expires_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/events")))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(api("/auth/refreshToken")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "message": "Refresh token expired"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = SessionStore::new();
    let gateway = AuthGateway::builder()
        .base_url(mock_server.uri())
        .session(store.clone())
        .build()
        .unwrap();
    store.establish(Session::authenticated(TokenExpiry {
        access_token_expiry: Utc::now(),
        refresh_token_expiry: Utc::now() + Duration::days(1),
    }));

    let result = gateway.send::<Value>(ApiRequest::get("/events")).await;

    assert!(matches!(result, Err(ClientError::SessionExpired)));
    assert!(store.current().is_none());
}

#[tokio::test]
async fn test_still_unauthorized_after_refresh_gives_up() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(api("/shows")))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(api("/auth/refreshToken")))
        .respond_with(ResponseTemplate::new(200).set_body_json(expiry_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    let result = gateway.send::<Value>(ApiRequest::get("/shows")).await;

    assert!(matches!(result, Err(ClientError::SessionExpired)));
    assert!(gateway.session().current().is_none());
}

#[tokio::test]
async fn test_non_refreshable_request_returns_rejection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "message": "Bad credentials"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(api("/auth/refreshToken")))
        .respond_with(ResponseTemplate::new(200).set_body_json(expiry_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let request = ApiRequest::post("/auth/login").without_refresh();
    let error = gateway(&mock_server)
        .send::<Value>(request)
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(401));
    assert_eq!(error.user_message(), "Bad credentials");
}

#[tokio::test]
async fn test_refresh_cookie_is_sent_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/refreshToken")))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "accessToken=fresh; Path=/; HttpOnly")
                .set_body_json(expiry_body()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(api("/users/me/profile")))
        .and(header("cookie", "accessToken=fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 200,
            "data": {"userId": "u-2"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    gateway.refresh_session().await.unwrap();
    assert_eq!(gateway.get_profile().await.unwrap().user_id, "u-2");
}

#[tokio::test]
async fn test_boot_with_unreachable_backend_lands_on_login() {
    let base_url = {
        let mock_server = MockServer::start().await;
        mock_server.uri()
    };

    let gateway = AuthGateway::builder().base_url(base_url).build().unwrap();
    let boot = SessionBootstrap::new();

    let outcome = boot.run(&gateway).await;

    assert_eq!(outcome, Some(BootOutcome::Anonymous));
    assert!(!boot.is_loading());
    let session = gateway.session().current();
    assert_eq!(
        access::decide(RouteKind::Protected, session.as_ref()),
        RouteDecision::Redirect(Destination::Login)
    );
}

#[tokio::test]
async fn test_boot_with_valid_refresh_cookie_authenticates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/refreshToken")))
        .and(header("x-client-source", "WEB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(expiry_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    let boot = SessionBootstrap::new();

    let outcome = boot.run(&gateway).await.unwrap();
    assert!(outcome.is_authenticated());
    assert_eq!(boot.run(&gateway).await, Some(outcome));

    let session = gateway.session().current();
    assert_eq!(
        access::decide(RouteKind::Protected, session.as_ref()),
        RouteDecision::Render
    );
}
