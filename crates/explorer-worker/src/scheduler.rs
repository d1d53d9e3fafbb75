//! Cron scheduler for periodic maintenance tasks.

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use explorer_cache::CredentialsCache;
use explorer_core::error::AppError;

/// Cron-based scheduler for cache maintenance.
pub struct MaintenanceScheduler {
    scheduler: JobScheduler,
}

impl std::fmt::Debug for MaintenanceScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaintenanceScheduler").finish()
    }
}

impl MaintenanceScheduler {
    /// Create a new scheduler
    pub async fn new() -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;
        Ok(Self { scheduler })
    }

    /// Evict expired credentials on `schedule` (six-field cron expression).
    pub async fn register_credential_sweep(
        &self,
        schedule: &str,
        cache: CredentialsCache,
    ) -> Result<(), AppError> {
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let cache = cache.clone();
            Box::pin(async move {
                let remaining = cache.sweep().await;
                tracing::debug!("Credential sweep finished, {} cached entries remain", remaining);
            })
        })
        .map_err(|e| {
            AppError::configuration(format!("Invalid credential sweep schedule '{}': {}", schedule, e))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add credential sweep schedule: {}", e))
        })?;

        tracing::info!("Registered: credential_sweep ({})", schedule);
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;
        tracing::info!("Maintenance scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&self) -> Result<(), AppError> {
        let mut scheduler = self.scheduler.clone();
        scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;
        tracing::info!("Maintenance scheduler shut down");
        Ok(())
    }
}
