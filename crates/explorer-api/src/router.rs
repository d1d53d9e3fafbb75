//! Route definitions for the WITSML Explorer HTTP API.
//!
//! Domain routes are mounted under `/api`; the health check sits at the root.

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(job_routes())
        .merge(credential_routes())
        .merge(server_routes());

    let cors = build_cors_layer(&state.config.server);

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Job submission and polling
fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs/userjobinfos", get(handlers::jobs::user_job_infos))
        .route("/jobs/userjobinfo/{id}", get(handlers::jobs::user_job_info))
        .route("/jobs/{job_type}", post(handlers::jobs::create_job))
}

/// Interactive login and logout
fn credential_routes() -> Router<AppState> {
    Router::new()
        .route("/credentials/authorize", post(handlers::credentials::authorize))
        .route("/credentials/deauthorize", post(handlers::credentials::deauthorize))
}

/// Server records
fn server_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/witsml-servers",
            get(handlers::servers::list_servers).post(handlers::servers::create_server),
        )
        .route(
            "/witsml-servers/{id}",
            patch(handlers::servers::update_server).delete(handlers::servers::delete_server),
        )
}
