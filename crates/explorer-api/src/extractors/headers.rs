//! `RequestHeaders` extractor: the headers credential resolution needs.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use explorer_auth::EssentialHeaders;

use crate::state::AppState;

/// Essential headers of the current request.
#[derive(Debug, Clone)]
pub struct RequestHeaders(pub EssentialHeaders);

impl std::ops::Deref for RequestHeaders {
    type Target = EssentialHeaders;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for RequestHeaders {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequestHeaders(EssentialHeaders::from_headers(
            &parts.headers,
            &state.config.credentials.cookie_name,
        )))
    }
}
