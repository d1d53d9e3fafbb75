//! Integration tests for login, logout and credential resolution.

mod helpers;

use helpers::{SERVER, TestApp, VALID_ROLE, bearer, token};
use http::StatusCode;
use serde_json::{Value, json};

fn usernames(body: &Value) -> Vec<String> {
    body[0]["currentUsernames"]
        .as_array()
        .map(|names| {
            names
                .iter()
                .filter_map(|n| n.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_authorize_issues_session_cookie() {
    let app = TestApp::basic();
    let cookie = app.login("user", "pass").await;
    assert!(cookie.starts_with("witsmlexplorer="));

    let response = app
        .request("GET", "/api/witsml-servers", None, &[("Cookie", cookie.as_str())])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(usernames(&response.body), vec!["user".to_string()]);
}

#[tokio::test]
async fn test_authorize_rejects_wrong_password() {
    let app = TestApp::basic();
    let response = app
        .request(
            "POST",
            "/api/credentials/authorize",
            Some(json!({ "userId": "user", "password": "wrong" })),
            &[("WitsmlTargetServer", SERVER)],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_authorize_requires_target_server() {
    let app = TestApp::basic();
    let response = app
        .request(
            "POST",
            "/api/credentials/authorize",
            Some(json!({ "userId": "user", "password": "pass" })),
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_authorize_rejects_empty_user() {
    let app = TestApp::basic();
    let response = app
        .request(
            "POST",
            "/api/credentials/authorize",
            Some(json!({ "userId": "", "password": "pass" })),
            &[("WitsmlTargetServer", SERVER)],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deauthorize_evicts_session_credentials() {
    let app = TestApp::basic();
    let cookie = app.login("user", "pass").await;

    let response = app
        .request(
            "POST",
            "/api/credentials/deauthorize",
            None,
            &[("Cookie", cookie.as_str())],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["removed"], 1);

    let response = app
        .request("GET", "/api/witsml-servers", None, &[("Cookie", cookie.as_str())])
        .await;
    assert!(usernames(&response.body).is_empty());
}

#[tokio::test]
async fn test_sessions_do_not_share_credentials() {
    let app = TestApp::basic();
    app.login("user", "pass").await;

    let response = app
        .request(
            "GET",
            "/api/witsml-servers",
            None,
            &[("Cookie", "witsmlexplorer=someone-else")],
        )
        .await;
    assert!(usernames(&response.body).is_empty());
}

#[tokio::test]
async fn test_system_credentials_require_role() {
    let app = TestApp::oauth();

    let allowed = bearer(&token("alice@example.com", &[VALID_ROLE]));
    let response = app
        .request(
            "GET",
            "/api/witsml-servers",
            None,
            &[("Authorization", allowed.as_str())],
        )
        .await;
    assert_eq!(usernames(&response.body), vec!["systemuser".to_string()]);

    let denied = bearer(&token("bob@example.com", &["otherrole"]));
    let response = app
        .request(
            "GET",
            "/api/witsml-servers",
            None,
            &[("Authorization", denied.as_str())],
        )
        .await;
    assert!(usernames(&response.body).is_empty());
}

#[tokio::test]
async fn test_oauth_mode_issues_no_cookie() {
    let app = TestApp::oauth();
    let auth = bearer(&token("alice@example.com", &[VALID_ROLE]));
    let response = app
        .request("GET", "/api/witsml-servers", None, &[("Authorization", auth.as_str())])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.cookie.is_none());
}

#[tokio::test]
async fn test_tampered_token_is_ignored() {
    let app = TestApp::oauth();
    let mut forged = token("mallory@example.com", &[VALID_ROLE]);
    forged.push('x');
    let auth = bearer(&forged);
    let response = app
        .request("GET", "/api/witsml-servers", None, &[("Authorization", auth.as_str())])
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(usernames(&response.body).is_empty());
}

#[tokio::test]
async fn test_oauth_without_signing_secret_refuses_to_start() {
    let config: explorer_core::config::AppConfig = serde_json::from_value(json!({
        "auth": { "oauth2_enabled": true, "verify_token_signature": true, "jwt_secret": "" }
    }))
    .unwrap();
    let factory = std::sync::Arc::new(explorer_store::MemoryStoreFactory::new());

    let err = explorer_api::AppState::build(config, factory).unwrap_err();
    assert_eq!(err.kind, explorer_core::error::ErrorKind::Configuration);
}
