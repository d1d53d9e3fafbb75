//! HTTP request handlers.

pub mod credentials;
pub mod health;
pub mod jobs;
pub mod servers;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use explorer_auth::EssentialHeaders;

use crate::state::AppState;

/// The name jobs and job records are attributed to. With OAuth this is the
/// token's user principal; otherwise only the session cookie counts.
pub(crate) fn caller_name(state: &AppState, headers: &EssentialHeaders) -> Option<String> {
    let oauth2_enabled = state.oauth2_enabled();
    oauth2_enabled
        .then(|| state.credentials.username(headers))
        .flatten()
        .or_else(|| state.credentials.session_id(oauth2_enabled, headers))
}

/// Without OAuth the session is identified by a cookie; issue one when the
/// caller has none.
pub(crate) fn ensure_session(
    state: &AppState,
    jar: CookieJar,
    headers: EssentialHeaders,
) -> (CookieJar, EssentialHeaders) {
    if state.oauth2_enabled() || headers.session_cookie.is_some() {
        return (jar, headers);
    }
    let session_id = uuid::Uuid::new_v4().to_string();
    tracing::debug!("Issuing new session cookie");
    let cookie = Cookie::build((state.config.credentials.cookie_name.clone(), session_id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict);
    (jar.add(cookie), headers.with_session_cookie(session_id))
}
