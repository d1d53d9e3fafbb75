//! Request headers that drive credential resolution.

use axum_extra::extract::cookie::CookieJar;
use http::HeaderMap;
use http::header::AUTHORIZATION;

/// Header naming the server a job or request targets.
pub const TARGET_SERVER_HEADER: &str = "WitsmlTargetServer";
/// Header naming the server a copy job reads from.
pub const SOURCE_SERVER_HEADER: &str = "WitsmlSourceServer";
/// Header selecting which cached or system user to use on the target server.
pub const TARGET_USERNAME_HEADER: &str = "WitsmlTargetUsername";
/// Header selecting which cached or system user to use on the source server.
pub const SOURCE_USERNAME_HEADER: &str = "WitsmlSourceUsername";

/// The subset of request headers credential resolution needs.
#[derive(Debug, Clone, Default)]
pub struct EssentialHeaders {
    /// Raw `Authorization` header value.
    pub authorization: Option<String>,
    /// Target server URL.
    pub target_server: Option<String>,
    /// Source server URL.
    pub source_server: Option<String>,
    /// Desired user on the target server.
    pub target_username: Option<String>,
    /// Desired user on the source server.
    pub source_username: Option<String>,
    /// Value of the session cookie.
    pub session_cookie: Option<String>,
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

impl EssentialHeaders {
    /// Extract the essential headers from a request.
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Self {
        let jar = CookieJar::from_headers(headers);
        Self {
            authorization: header_value(headers, AUTHORIZATION.as_str()),
            target_server: header_value(headers, TARGET_SERVER_HEADER),
            source_server: header_value(headers, SOURCE_SERVER_HEADER),
            target_username: header_value(headers, TARGET_USERNAME_HEADER),
            source_username: header_value(headers, SOURCE_USERNAME_HEADER),
            session_cookie: jar
                .get(cookie_name)
                .map(|c| c.value().to_owned())
                .filter(|v| !v.is_empty()),
        }
    }

    /// The bearer token, if the `Authorization` header uses the Bearer scheme.
    pub fn bearer_token(&self) -> Option<&str> {
        let value = self.authorization.as_deref()?;
        let (scheme, token) = value.split_once(' ')?;
        if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
            Some(token.trim())
        } else {
            None
        }
    }

    /// Set the bearer token (used by tests and internal callers).
    pub fn with_bearer(mut self, token: &str) -> Self {
        self.authorization = Some(format!("Bearer {token}"));
        self
    }

    /// Set the session cookie value.
    pub fn with_session_cookie(mut self, value: impl Into<String>) -> Self {
        self.session_cookie = Some(value.into());
        self
    }
}
