//! Application builder and server entry point.

use axum::Router;

use explorer_core::config::AppConfig;
use explorer_core::error::AppError;
use explorer_store::create_factory;
use explorer_worker::MaintenanceScheduler;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the WITSML Explorer server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting WITSML Explorer server...");

    tracing::info!("Initializing remote store (provider: {})...", config.store.provider);
    let store_factory = create_factory(&config.store)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let sweep_schedule = config.credentials.sweep_schedule.clone();
    let state = AppState::build(config, store_factory)?;

    let scheduler = MaintenanceScheduler::new().await?;
    scheduler
        .register_credential_sweep(&sweep_schedule, state.cache.clone())
        .await?;
    scheduler.start().await?;

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("WITSML Explorer server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    scheduler.shutdown().await?;
    tracing::info!("WITSML Explorer server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
