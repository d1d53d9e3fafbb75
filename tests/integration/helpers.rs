//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;

use explorer_api::{AppState, build_app};
use explorer_core::config::AppConfig;
use explorer_entity::credentials::ServerCredentials;
use explorer_store::{MemoryStore, MemoryStoreFactory};

/// The configured WITSML server every test talks to.
pub const SERVER: &str = "http://some.url.com";
/// Role that unlocks the system credentials of [`SERVER`].
pub const VALID_ROLE: &str = "validrole";
/// Secret used to sign test tokens.
pub const JWT_SECRET: &str = "integration-test-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared application state
    pub state: AppState,
    /// In-memory stores behind the remote clients
    pub stores: Arc<MemoryStoreFactory>,
}

/// Response from a test request
pub struct TestResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response body as JSON (`Null` when empty)
    pub body: Value,
    /// `name=value` of the session cookie set by the response, if any
    pub cookie: Option<String>,
}

impl TestApp {
    /// Create an application using session cookies.
    pub fn basic() -> Self {
        Self::new(false)
    }

    /// Create an application resolving system credentials from bearer tokens.
    pub fn oauth() -> Self {
        Self::new(true)
    }

    fn new(oauth2_enabled: bool) -> Self {
        let config: AppConfig = serde_json::from_value(json!({
            "auth": {
                "oauth2_enabled": oauth2_enabled,
                "verify_token_signature": true,
                "jwt_secret": JWT_SECRET,
                "system_credentials": [
                    { "host": SERVER, "user_id": "systemuser", "password": "systempassword" }
                ]
            },
            "servers": [
                {
                    "name": "Test server",
                    "url": SERVER,
                    "security_scheme": "OAuth2",
                    "roles": [VALID_ROLE]
                }
            ]
        }))
        .expect("Failed to build test config");

        let host = Url::parse(SERVER).expect("Invalid test server url");
        let stores = Arc::new(
            MemoryStoreFactory::new()
                .with_account(ServerCredentials::new(host.clone(), "user", "pass"))
                .with_account(ServerCredentials::new(host, "systemuser", "systempassword")),
        );

        let state = AppState::build(config, stores.clone()).expect("Failed to build app state");
        let router = build_app(state.clone());

        Self {
            router,
            state,
            stores,
        }
    }

    /// The store behind [`SERVER`].
    pub fn store(&self) -> Arc<MemoryStore> {
        self.stores
            .store(&Url::parse(SERVER).expect("Invalid test server url"))
    }

    /// Make a request with extra headers.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let body = match body {
            Some(json) => {
                builder = builder.header("Content-Type", "application/json");
                Body::from(serde_json::to_vec(&json).expect("Failed to encode body"))
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("Failed to build request"))
            .await
            .expect("Request failed");

        let status = response.status();
        let cookie = response
            .headers()
            .get(http::header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse {
            status,
            body,
            cookie,
        }
    }

    /// Log in to [`SERVER`] and return the session cookie.
    pub async fn login(&self, user: &str, password: &str) -> String {
        let resp = self
            .request(
                "POST",
                "/api/credentials/authorize",
                Some(json!({ "userId": user, "password": password })),
                &[("WitsmlTargetServer", SERVER)],
            )
            .await;
        assert_eq!(resp.status, StatusCode::OK, "login failed: {}", resp.body);
        resp.cookie.expect("No session cookie issued")
    }

    /// Poll a job until it reaches a terminal status.
    pub async fn wait_for_job(&self, job_id: &str, headers: &[(&str, &str)]) -> Value {
        let path = format!("/api/jobs/userjobinfo/{}", job_id);
        for _ in 0..100 {
            let resp = self.request("GET", &path, None, headers).await;
            assert_eq!(resp.status, StatusCode::OK, "job lookup failed: {}", resp.body);
            let status = resp.body["status"].as_str().unwrap_or_default().to_string();
            if !matches!(status.as_str(), "Created" | "Running") {
                return resp.body;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("Job {} did not finish", job_id);
    }
}

/// Sign a bearer token carrying `roles`.
pub fn token(upn: &str, roles: &[&str]) -> String {
    let claims = json!({
        "roles": roles,
        "upn": upn,
        "sub": format!("{}-subject", upn),
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    jsonwebtoken::encode(
        &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("Failed to sign token")
}

/// `Authorization` header value for `token`.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
