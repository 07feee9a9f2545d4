//! Login and password flows against a mocked backend

use serde_json::{Value, json};
use ticketcore_client::{AuthGateway, ClientError, Credentials, LoginOutcome, PasswordPair};
use ticketcore_core::PendingContext;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API: &str = "/ticketcore-api/api/v1";

fn api(suffix: &str) -> String {
    format!("{API}{suffix}")
}

fn gateway(server: &MockServer) -> AuthGateway {
    AuthGateway::builder()
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn credentials() -> Credentials {
    Credentials {
        email: "ops@ticketcore.dev".into(),
        password: "correct horse".into(),
    }
}

fn login_body(extra: Value) -> Value {
    let mut data = json!({
        "accessTokenExpiry": "2026-10-16T10:15:00",
        "refreshTokenExpiry": "2026-10-23T10:00:00"
    });
    if let (Some(data), Some(extra)) = (data.as_object_mut(), extra.as_object()) {
        data.extend(extra.clone());
    }
    json!({"statusCode": 200, "message": "Login successful", "data": data})
}

async fn mount_login(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .and(body_json(json!({
            "email": "ops@ticketcore.dev",
            "password": "correct horse"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_plain_login_authenticates() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, login_body(json!({}))).await;

    let gateway = gateway(&mock_server);
    let outcome = gateway.login(&credentials()).await.unwrap();

    assert!(matches!(outcome, LoginOutcome::Authenticated(_)));
    assert!(gateway.session().is_authenticated());
}

#[tokio::test]
async fn test_two_factor_login_then_verify() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, login_body(json!({"tempToken": "tmp-42"}))).await;

    Mock::given(method("POST"))
        .and(path(api("/auth/verify-otp")))
        .and(body_json(json!({"tempToken": "tmp-42", "otp": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body(json!({}))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    let outcome = gateway.login(&credentials()).await.unwrap();
    assert!(matches!(outcome, LoginOutcome::TwoFactorRequired(_)));
    assert!(!gateway.session().is_authenticated());

    let session = gateway.verify_otp("123456").await.unwrap();
    assert_eq!(session.pending, PendingContext::None);
    assert!(gateway.session().is_authenticated());
}

#[tokio::test]
async fn test_verify_otp_without_pending_challenge() {
    let mock_server = MockServer::start().await;
    let result = gateway(&mock_server).verify_otp("000000").await;
    assert!(matches!(result, Err(ClientError::InvalidState(_))));
}

#[tokio::test]
async fn test_password_change_login() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, login_body(json!({"pwdChangeToken": "pwd-7"}))).await;

    Mock::given(method("POST"))
        .and(path(api("/auth/change-password")))
        .and(body_partial_json(json!({"pwdChangeToken": "pwd-7"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 200,
            "message": "Password changed"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    let outcome = gateway.login(&credentials()).await.unwrap();
    assert_eq!(
        outcome.session().map(|s| s.pending),
        Some(PendingContext::PasswordChange)
    );

    let passwords = PasswordPair {
        new_password: "new secret".into(),
        confirm_password: "new secret".into(),
    };
    let message = gateway.change_password(&passwords).await.unwrap();

    assert_eq!(message, "Password changed");
    assert!(gateway.session().current().is_none());
}

#[tokio::test]
async fn test_embedded_409_requires_password_reset() {
    let mock_server = MockServer::start().await;
    mount_login(
        &mock_server,
        json!({"statusCode": 409, "message": "Password expired, please reset it"}),
    )
    .await;

    let gateway = gateway(&mock_server);
    let outcome = gateway.login(&credentials()).await.unwrap();

    assert_eq!(
        outcome,
        LoginOutcome::PasswordResetRequired {
            message: "Password expired, please reset it".into()
        }
    );
    assert!(gateway.session().current().is_none());
}

#[tokio::test]
async fn test_bad_credentials_are_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/login")))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "statusCode": 401,
            "message": "Invalid email or password"
        })))
        .mount(&mock_server)
        .await;

    let error = gateway(&mock_server)
        .login(&credentials())
        .await
        .unwrap_err();
    assert_eq!(error.user_message(), "Invalid email or password");
}

#[tokio::test]
async fn test_reset_flow_returns_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(api("/auth/forgot-password")))
        .and(body_json(json!({"email": "ops@ticketcore.dev"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 200,
            "message": "OTP sent"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(api("/auth/verify-reset-otp")))
        .and(body_json(json!({"email": "ops@ticketcore.dev", "otp": "654321"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 200,
            "data": {"resetToken": "reset-1"}
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(api("/auth/reset-password")))
        .and(body_json(json!({
            "resetToken": "reset-1",
            "newPassword": "fresh",
            "confirmPassword": "fresh"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "statusCode": 200,
            "message": "Password reset"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    assert_eq!(
        gateway.forgot_password("ops@ticketcore.dev").await.unwrap(),
        "OTP sent"
    );
    let token = gateway
        .verify_reset_otp("ops@ticketcore.dev", "654321")
        .await
        .unwrap();
    assert_eq!(token, "reset-1");

    let passwords = PasswordPair {
        new_password: "fresh".into(),
        confirm_password: "fresh".into(),
    };
    assert_eq!(
        gateway.reset_password(&token, &passwords).await.unwrap(),
        "Password reset"
    );
}

#[tokio::test]
async fn test_logout_clears_session_even_on_failure() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, login_body(json!({}))).await;

    Mock::given(method("POST"))
        .and(path(api("/auth/logout")))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gateway = gateway(&mock_server);
    gateway.login(&credentials()).await.unwrap();
    assert!(gateway.session().is_authenticated());

    let result = gateway.logout().await;

    assert!(matches!(result, Err(ClientError::Rejected { status: 500, .. })));
    assert!(gateway.session().current().is_none());
}
