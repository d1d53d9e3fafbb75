//! Integration tests for job submission and job records.

mod helpers;

use helpers::{SERVER, TestApp, VALID_ROLE, bearer, token};
use http::StatusCode;
use serde_json::json;

use explorer_entity::object::{ObjectType, WitsmlObject};

fn seed_rigs(app: &TestApp, uids: &[&str]) {
    let store = app.store();
    store.insert(WitsmlObject::well("w1").with_name("Well 1"));
    store.insert(WitsmlObject::wellbore("w1", "wb1").with_name("Wellbore 1"));
    for uid in uids {
        store.insert(WitsmlObject::child(ObjectType::Rig, "w1", "wb1", *uid).with_name(*uid));
    }
}

fn delete_rigs_body(uids: &[&str]) -> serde_json::Value {
    json!({
        "toDelete": {
            "wellUid": "w1",
            "wellboreUid": "wb1",
            "objectUids": uids,
            "wellName": "Well 1",
            "wellboreName": "Wellbore 1"
        }
    })
}

#[tokio::test]
async fn test_delete_rigs_with_cached_credentials() {
    let app = TestApp::basic();
    seed_rigs(&app, &["r1", "r2"]);
    let cookie = app.login("user", "pass").await;
    let headers = [("Cookie", cookie.as_str()), ("WitsmlTargetServer", SERVER)];

    let response = app
        .request(
            "POST",
            "/api/jobs/DeleteRigs",
            Some(delete_rigs_body(&["r1", "r2"])),
            &headers,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let job_id = response.body["jobId"].as_str().unwrap().to_string();

    let info = app.wait_for_job(&job_id, &headers).await;
    assert_eq!(info["status"], "Succeeded");
    assert_eq!(info["jobType"], "DeleteRigs");
    assert_eq!(info["witsmlTargetUsername"], "user");
    assert_eq!(info["result"]["isSuccess"], true);

    let store = app.store();
    assert!(!store.contains(&WitsmlObject::child(ObjectType::Rig, "w1", "wb1", "r1")));
    assert!(!store.contains(&WitsmlObject::child(ObjectType::Rig, "w1", "wb1", "r2")));
}

#[tokio::test]
async fn test_bulk_delete_partially_succeeds() {
    let app = TestApp::basic();
    seed_rigs(&app, &["r1", "r2"]);
    app.store().reject("r2", "Object is locked");
    let cookie = app.login("user", "pass").await;
    let headers = [("Cookie", cookie.as_str()), ("WitsmlTargetServer", SERVER)];

    let response = app
        .request(
            "POST",
            "/api/jobs/DeleteRigs",
            Some(delete_rigs_body(&["r1", "r2"])),
            &headers,
        )
        .await;
    let job_id = response.body["jobId"].as_str().unwrap().to_string();

    let info = app.wait_for_job(&job_id, &headers).await;
    assert_eq!(info["status"], "PartiallySucceeded");
    assert_eq!(info["result"]["isSuccess"], false);
    assert_eq!(info["result"]["reason"], "Object is locked");
    assert!(
        app.store()
            .contains(&WitsmlObject::child(ObjectType::Rig, "w1", "wb1", "r2"))
    );
}

#[tokio::test]
async fn test_job_without_credentials_is_unauthorized() {
    let app = TestApp::basic();
    let response = app
        .request(
            "POST",
            "/api/jobs/DeleteRigs",
            Some(delete_rigs_body(&["r1"])),
            &[
                ("Cookie", "witsmlexplorer=unknown-session"),
                ("WitsmlTargetServer", SERVER),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_job_without_target_server_is_rejected() {
    let app = TestApp::basic();
    let cookie = app.login("user", "pass").await;
    let response = app
        .request(
            "POST",
            "/api/jobs/DeleteRigs",
            Some(delete_rigs_body(&["r1"])),
            &[("Cookie", cookie.as_str())],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_job_type_is_rejected() {
    let app = TestApp::basic();
    let cookie = app.login("user", "pass").await;
    let response = app
        .request(
            "POST",
            "/api/jobs/DeleteEverything",
            Some(json!({})),
            &[("Cookie", cookie.as_str()), ("WitsmlTargetServer", SERVER)],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_payload_is_rejected() {
    let app = TestApp::basic();
    let cookie = app.login("user", "pass").await;
    let response = app
        .request(
            "POST",
            "/api/jobs/DeleteRigs",
            Some(json!({ "toDelete": "not an object" })),
            &[("Cookie", cookie.as_str()), ("WitsmlTargetServer", SERVER)],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_job_records_are_scoped_to_caller() {
    let app = TestApp::basic();
    seed_rigs(&app, &["r1"]);
    let cookie = app.login("user", "pass").await;
    let headers = [("Cookie", cookie.as_str()), ("WitsmlTargetServer", SERVER)];

    let response = app
        .request(
            "POST",
            "/api/jobs/DeleteRigs",
            Some(delete_rigs_body(&["r1"])),
            &headers,
        )
        .await;
    let job_id = response.body["jobId"].as_str().unwrap().to_string();
    app.wait_for_job(&job_id, &headers).await;

    let mine = app
        .request("GET", "/api/jobs/userjobinfos", None, &headers)
        .await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body.as_array().unwrap().len(), 1);
    assert_eq!(mine.body[0]["id"], job_id.as_str());

    let other = [("Cookie", "witsmlexplorer=another-session")];
    let theirs = app
        .request("GET", "/api/jobs/userjobinfos", None, &other)
        .await;
    assert!(theirs.body.as_array().unwrap().is_empty());

    let lookup = app
        .request(
            "GET",
            &format!("/api/jobs/userjobinfo/{}", job_id),
            None,
            &other,
        )
        .await;
    assert_eq!(lookup.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_well_with_system_credentials() {
    let app = TestApp::oauth();
    let auth = bearer(&token("alice@example.com", &[VALID_ROLE]));
    let headers = [("Authorization", auth.as_str()), ("WitsmlTargetServer", SERVER)];

    let response = app
        .request(
            "POST",
            "/api/jobs/CreateWell",
            Some(json!({ "object": { "objectType": "Well", "uid": "w9", "name": "New well" } })),
            &headers,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let job_id = response.body["jobId"].as_str().unwrap().to_string();

    let info = app.wait_for_job(&job_id, &headers).await;
    assert_eq!(info["status"], "Succeeded");
    assert_eq!(info["username"], "alice@example.com");
    assert_eq!(info["witsmlTargetUsername"], "systemuser");
    assert!(app.store().contains(&WitsmlObject::well("w9")));
}

#[tokio::test]
async fn test_system_credentials_denied_without_role() {
    let app = TestApp::oauth();
    let auth = bearer(&token("bob@example.com", &["otherrole"]));
    let response = app
        .request(
            "POST",
            "/api/jobs/CreateWell",
            Some(json!({ "object": { "objectType": "Well", "uid": "w9" } })),
            &[("Authorization", auth.as_str()), ("WitsmlTargetServer", SERVER)],
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_copy_requires_source_server() {
    let app = TestApp::oauth();
    let auth = bearer(&token("alice@example.com", &[VALID_ROLE]));
    let body = json!({
        "source": { "wellUid": "w1", "wellboreUid": "wb1", "objectUids": ["l1"] },
        "target": { "wellUid": "w1", "wellboreUid": "wb2" }
    });

    let response = app
        .request(
            "POST",
            "/api/jobs/CopyLog",
            Some(body.clone()),
            &[("Authorization", auth.as_str()), ("WitsmlTargetServer", SERVER)],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let store = app.store();
    store.insert(WitsmlObject::well("w1"));
    store.insert(WitsmlObject::wellbore("w1", "wb1"));
    store.insert(WitsmlObject::wellbore("w1", "wb2"));
    store.insert(WitsmlObject::child(ObjectType::Log, "w1", "wb1", "l1").with_name("Log 1"));

    let headers = [
        ("Authorization", auth.as_str()),
        ("WitsmlTargetServer", SERVER),
        ("WitsmlSourceServer", SERVER),
    ];
    let response = app
        .request("POST", "/api/jobs/CopyLog", Some(body), &headers)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let job_id = response.body["jobId"].as_str().unwrap().to_string();

    let info = app.wait_for_job(&job_id, &headers).await;
    assert_eq!(info["status"], "Succeeded");
    assert_eq!(info["witsmlSourceUsername"], "systemuser");
    assert!(store.contains(&WitsmlObject::child(ObjectType::Log, "w1", "wb2", "l1")));
}

#[tokio::test]
async fn test_bearer_token_does_not_override_session_without_oauth() {
    let app = TestApp::basic();
    seed_rigs(&app, &["r1"]);
    let cookie = app.login("user", "pass").await;
    let auth = bearer(&token("alice@example.com", &[VALID_ROLE]));
    let headers = [
        ("Cookie", cookie.as_str()),
        ("Authorization", auth.as_str()),
        ("WitsmlTargetServer", SERVER),
    ];

    let response = app
        .request(
            "POST",
            "/api/jobs/DeleteRigs",
            Some(delete_rigs_body(&["r1"])),
            &headers,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let job_id = response.body["jobId"].as_str().unwrap().to_string();
    let info = app.wait_for_job(&job_id, &headers).await;
    assert_ne!(info["username"], "alice@example.com");

    let other_session = app.login("user", "pass").await;
    let impostor = [
        ("Cookie", other_session.as_str()),
        ("Authorization", auth.as_str()),
    ];
    let theirs = app
        .request("GET", "/api/jobs/userjobinfos", None, &impostor)
        .await;
    assert!(theirs.body.as_array().unwrap().is_empty());

    let lookup = app
        .request(
            "GET",
            &format!("/api/jobs/userjobinfo/{}", job_id),
            None,
            &impostor,
        )
        .await;
    assert_eq!(lookup.status, StatusCode::NOT_FOUND);
}
