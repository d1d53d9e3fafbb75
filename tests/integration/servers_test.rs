//! Integration tests for WITSML server records.

mod helpers;

use helpers::{SERVER, TestApp};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_list_servers_issues_cookie() {
    let app = TestApp::basic();
    let response = app.request("GET", "/api/witsml-servers", None, &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    let servers = response.body.as_array().unwrap();
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0]["url"], format!("{}/", SERVER));
    assert_eq!(servers[0]["roles"], json!(["validrole"]));
    assert!(servers[0]["currentUsernames"].as_array().unwrap().is_empty());
    assert!(response.cookie.is_some());
}

#[tokio::test]
async fn test_existing_cookie_is_kept() {
    let app = TestApp::basic();
    let response = app
        .request(
            "GET",
            "/api/witsml-servers",
            None,
            &[("Cookie", "witsmlexplorer=existing")],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.cookie.is_none());
}

#[tokio::test]
async fn test_create_update_delete_server() {
    let app = TestApp::basic();

    let created = app
        .request(
            "POST",
            "/api/witsml-servers",
            Some(json!({
                "name": "Second",
                "url": "https://second.example.com",
                "roles": ["developer"]
            })),
            &[],
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["securityScheme"], "Basic");
    let id = created.body["id"].as_str().unwrap().to_string();

    let updated = app
        .request(
            "PATCH",
            &format!("/api/witsml-servers/{}", id),
            Some(json!({ "name": "Renamed" })),
            &[],
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["name"], "Renamed");
    assert_eq!(updated.body["roles"], json!(["developer"]));

    let listed = app.request("GET", "/api/witsml-servers", None, &[]).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 2);

    let deleted = app
        .request("DELETE", &format!("/api/witsml-servers/{}", id), None, &[])
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let again = app
        .request("DELETE", &format!("/api/witsml-servers/{}", id), None, &[])
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_url_conflicts() {
    let app = TestApp::basic();
    let response = app
        .request(
            "POST",
            "/api/witsml-servers",
            Some(json!({ "name": "Duplicate", "url": SERVER })),
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_empty_name_is_rejected() {
    let app = TestApp::basic();
    let response = app
        .request(
            "POST",
            "/api/witsml-servers",
            Some(json!({ "name": "", "url": "https://third.example.com" })),
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_server_id_is_rejected() {
    let app = TestApp::basic();
    let response = app
        .request(
            "PATCH",
            "/api/witsml-servers/not-an-id",
            Some(json!({ "name": "x" })),
            &[],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::basic();
    let response = app.request("GET", "/health", None, &[]).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
