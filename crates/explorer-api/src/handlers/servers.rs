//! WITSML server record handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use validator::Validate;

use explorer_core::AppError;
use explorer_core::traits::DocumentRepository;
use explorer_core::types::id::ServerId;
use explorer_entity::server::{CreateServer, Server, UpdateServer};

use super::ensure_session;
use crate::dto::request::CreateServerRequest;
use crate::dto::response::ServerResponse;
use crate::error::ApiError;
use crate::extractors::RequestHeaders;
use crate::state::AppState;

fn parse_id(id: &str) -> Result<ServerId, AppError> {
    id.parse()
        .map_err(|_| AppError::validation(format!("Invalid server id '{}'", id)))
}

/// GET /api/witsml-servers
pub async fn list_servers(
    State(state): State<AppState>,
    RequestHeaders(headers): RequestHeaders,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Vec<ServerResponse>>), ApiError> {
    let (jar, headers) = ensure_session(&state, jar, headers);
    let servers = state.servers.get_documents().await?;

    let mut response = Vec::with_capacity(servers.len());
    for server in servers {
        let current_usernames = state
            .credentials
            .get_logged_in_usernames(state.oauth2_enabled(), &headers, server.url.as_str())
            .await?;
        response.push(ServerResponse {
            server,
            current_usernames,
        });
    }
    Ok((jar, Json(response)))
}

/// POST /api/witsml-servers
pub async fn create_server(
    State(state): State<AppState>,
    Json(req): Json<CreateServerRequest>,
) -> Result<(StatusCode, Json<Server>), ApiError> {
    req.validate()?;
    let server = state
        .servers
        .create_document(CreateServer::from(req).into_server())
        .await?;
    tracing::info!(server_id = %server.id, url = %server.url, "Created server record");
    Ok((StatusCode::CREATED, Json(server)))
}

/// PATCH /api/witsml-servers/{id}
pub async fn update_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateServer>,
) -> Result<Json<Server>, ApiError> {
    let id = parse_id(&id)?;
    let mut server = state
        .servers
        .get_document(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Server {} not found", id)))?;
    update.apply(&mut server);
    Ok(Json(state.servers.update_document(&id, server).await?))
}

/// DELETE /api/witsml-servers/{id}
pub async fn delete_server(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    if state.servers.delete_document(&id).await? {
        tracing::info!(server_id = %id, "Deleted server record");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("Server {} not found", id)).into())
    }
}
