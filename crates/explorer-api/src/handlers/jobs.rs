//! Job submission and polling handlers.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use explorer_auth::EssentialHeaders;
use explorer_core::AppError;
use explorer_core::types::id::JobId;
use explorer_entity::job::{Job, JobInfo, JobKind};
use explorer_store::RemoteStoreClient;
use explorer_worker::JobContext;

use super::caller_name;
use crate::dto::response::JobCreatedResponse;
use crate::error::ApiError;
use crate::extractors::RequestHeaders;
use crate::state::AppState;

/// Resolve credentials for `server` and build a client with them.
async fn client_for(
    state: &AppState,
    headers: &EssentialHeaders,
    server: Option<&str>,
    desired_user: Option<&str>,
    role: &str,
) -> Result<(Arc<dyn RemoteStoreClient>, String), AppError> {
    let server =
        server.ok_or_else(|| AppError::validation(format!("Missing {} server header", role)))?;
    let credentials = state
        .credentials
        .get_credentials(state.oauth2_enabled(), headers, server, desired_user)
        .await?
        .ok_or_else(|| {
            AppError::authentication(format!("Missing or expired credentials for {}", server))
        })?;
    let client = state.store_factory.create_client(&credentials)?;
    Ok((client, credentials.user_id))
}

/// POST /api/jobs/{job_type}
pub async fn create_job(
    State(state): State<AppState>,
    RequestHeaders(headers): RequestHeaders,
    Path(job_type): Path<String>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<JobCreatedResponse>, ApiError> {
    let kind: JobKind = job_type.parse()?;
    let job: Job = serde_json::from_value(serde_json::json!({
        "jobType": kind.as_str(),
        "payload": payload,
    }))
    .map_err(AppError::from)?;

    let (target, target_user) = client_for(
        &state,
        &headers,
        headers.target_server.as_deref(),
        headers.target_username.as_deref(),
        "target",
    )
    .await?;
    let mut ctx = JobContext::new(target);
    let mut source_user = None;
    if job.requires_source_server() {
        let (source, user) = client_for(
            &state,
            &headers,
            headers.source_server.as_deref(),
            headers.source_username.as_deref(),
            "source",
        )
        .await?;
        ctx = ctx.with_source(source);
        source_user = Some(user);
    }
    let ctx = ctx
        .with_username(caller_name(&state, &headers))
        .with_store_users(Some(target_user), source_user);

    let ticket = state.queue.enqueue(job, ctx).await?;
    Ok(Json(JobCreatedResponse { job_id: ticket.id }))
}

/// GET /api/jobs/userjobinfos
pub async fn user_job_infos(
    State(state): State<AppState>,
    RequestHeaders(headers): RequestHeaders,
) -> Result<Json<Vec<JobInfo>>, ApiError> {
    let caller = caller_name(&state, &headers)
        .ok_or_else(|| AppError::authentication("The caller could not be identified"))?;
    Ok(Json(state.queue.job_infos_for(&caller)))
}

/// GET /api/jobs/userjobinfo/{id}
pub async fn user_job_info(
    State(state): State<AppState>,
    RequestHeaders(headers): RequestHeaders,
    Path(id): Path<String>,
) -> Result<Json<JobInfo>, ApiError> {
    let id: JobId = id
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid job id '{}'", id)))?;
    let caller = caller_name(&state, &headers)
        .ok_or_else(|| AppError::authentication("The caller could not be identified"))?;
    let info = state
        .queue
        .job_info(id)
        .await
        .filter(|info| info.is_owned_by(&caller))
        .ok_or_else(|| AppError::not_found(format!("Job {} not found", id)))?;
    Ok(Json(info))
}
