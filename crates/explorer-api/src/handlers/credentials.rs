//! Interactive login and logout against WITSML servers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use url::Url;
use validator::Validate;

use explorer_core::AppError;
use explorer_entity::credentials::ServerCredentials;

use super::ensure_session;
use crate::dto::request::{AuthorizeQuery, AuthorizeRequest};
use crate::dto::response::DeauthorizeResponse;
use crate::error::ApiError;
use crate::extractors::RequestHeaders;
use crate::state::AppState;

/// POST /api/credentials/authorize
///
/// Verifies the credentials against the target server, then caches them
/// for the caller's session.
pub async fn authorize(
    State(state): State<AppState>,
    RequestHeaders(headers): RequestHeaders,
    jar: CookieJar,
    Query(query): Query<AuthorizeQuery>,
    Json(req): Json<AuthorizeRequest>,
) -> Result<(CookieJar, StatusCode), ApiError> {
    req.validate()?;
    let server = headers
        .target_server
        .as_deref()
        .ok_or_else(|| AppError::validation("Missing target server header"))?;
    let credentials = ServerCredentials::new(
        Url::parse(server).map_err(AppError::from)?,
        req.user_id,
        req.password,
    );

    let client = state.store_factory.create_client(&credentials)?;
    client.test_connection().await?;

    let (jar, headers) = ensure_session(&state, jar, headers);
    let session_id = state
        .credentials
        .session_id(state.oauth2_enabled(), &headers)
        .ok_or_else(|| AppError::authentication("The caller has no session"))?;
    let ttl_hours = if query.keep_logged_in {
        state.config.credentials.keep_logged_in_ttl_hours
    } else {
        state.config.credentials.ttl_hours
    };
    state
        .credentials
        .cache_credentials(&session_id, &credentials, ttl_hours, |now| now)
        .await?;

    Ok((jar, StatusCode::OK))
}

/// POST /api/credentials/deauthorize
pub async fn deauthorize(
    State(state): State<AppState>,
    RequestHeaders(headers): RequestHeaders,
) -> Json<DeauthorizeResponse> {
    let removed = match state.credentials.session_id(state.oauth2_enabled(), &headers) {
        Some(session_id) => state.credentials.remove_cached_credentials(&session_id).await,
        None => 0,
    };
    tracing::info!("Logged out, evicted {} cached credentials", removed);
    Json(DeauthorizeResponse { removed })
}
