//! Job queue: accepts jobs, drives each to a single outcome, and keeps
//! job records for polling.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing;
use url::Url;

use explorer_core::config::WorkerConfig;
use explorer_core::types::id::JobId;
use explorer_core::{AppError, AppResult};
use explorer_entity::job::{Job, JobInfo};
use explorer_entity::result::WorkerResult;

use crate::context::JobContext;
use crate::executor::{Worker, WorkerOutcome, WorkerRegistry};
use crate::notifier::RefreshNotifier;

/// Handle to an accepted job.
#[derive(Debug)]
pub struct JobTicket {
    /// Identifier of the accepted job.
    pub id: JobId,
    handle: JoinHandle<JobInfo>,
}

impl JobTicket {
    /// Wait for the job to finish and return its final record.
    pub async fn completion(self) -> AppResult<JobInfo> {
        self.handle
            .await
            .map_err(|e| AppError::worker(format!("Job task failed: {}", e)))
    }
}

struct Inner {
    registry: WorkerRegistry,
    notifier: Arc<dyn RefreshNotifier>,
    jobs: Cache<JobId, JobInfo>,
    permits: Arc<Semaphore>,
}

/// Accepts jobs and runs them on the registered workers.
#[derive(Clone)]
pub struct JobQueue {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for JobQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobQueue")
            .field("registry", &self.inner.registry)
            .field("jobs", &self.inner.jobs.entry_count())
            .finish()
    }
}

impl JobQueue {
    /// Create a queue dispatching to `registry`.
    pub fn new(
        registry: WorkerRegistry,
        notifier: Arc<dyn RefreshNotifier>,
        config: &WorkerConfig,
    ) -> Self {
        let jobs = Cache::builder()
            .max_capacity(config.max_job_records)
            .time_to_live(Duration::from_secs(config.job_retention_minutes.saturating_mul(60)))
            .build();
        Self {
            inner: Arc::new(Inner {
                registry,
                notifier,
                jobs,
                permits: Arc::new(Semaphore::new(config.max_concurrent_jobs.max(1))),
            }),
        }
    }

    /// Accept a job and schedule its execution.
    ///
    /// A job kind without a registered worker is rejected before anything
    /// is scheduled.
    pub async fn enqueue(&self, job: Job, ctx: JobContext) -> AppResult<JobTicket> {
        let kind = job.kind();
        let worker = self.inner.registry.get(kind).ok_or_else(|| {
            AppError::configuration(format!("No worker registered for job type '{}'", kind))
        })?;

        let id = JobId::new();
        let mut info = JobInfo::new(id, &job);
        info.username = ctx.username.clone();
        info.witsml_target_username = ctx.target_username.clone();
        info.witsml_source_username = ctx.source_username.clone();
        info.target_server = Some(ctx.target.server_url().to_string());
        info.source_server = ctx.source.as_ref().map(|s| s.server_url().to_string());
        self.inner.jobs.insert(id, info.clone()).await;

        tracing::info!(job_id = %id, job_kind = %kind, "Job enqueued: {}", info.description);

        let queue = self.clone();
        let handle = tokio::spawn(async move { queue.run(worker, job, ctx, info).await });
        Ok(JobTicket { id, handle })
    }

    async fn run(
        &self,
        worker: Arc<dyn Worker>,
        job: Job,
        ctx: JobContext,
        mut info: JobInfo,
    ) -> JobInfo {
        let _permit = Arc::clone(&self.inner.permits).acquire_owned().await;

        info.mark_running();
        self.inner.jobs.insert(info.id, info.clone()).await;
        tracing::debug!(job_id = %info.id, job_kind = %info.job_type, "Job started");

        let outcome = run_worker(worker, job, ctx).await;
        let has_refresh = outcome.refresh.is_some();
        info.finish(outcome.result, has_refresh);
        self.inner.jobs.insert(info.id, info.clone()).await;

        tracing::info!(
            job_id = %info.id,
            job_kind = %info.job_type,
            status = %info.status,
            "Job finished"
        );

        if let Some(refresh) = &outcome.refresh {
            self.inner.notifier.notify_refresh(refresh).await;
        }
        self.inner.notifier.notify_job_finished(&info).await;
        info
    }

    /// Run a job to completion on the current task's behalf.
    ///
    /// Never fails: worker errors and panics become a failed result.
    pub async fn execute(&self, job: &Job, ctx: &JobContext) -> WorkerOutcome {
        let kind = job.kind();
        let Some(worker) = self.inner.registry.get(kind) else {
            let err =
                AppError::configuration(format!("No worker registered for job type '{}'", kind));
            return fault(ctx.target.server_url(), err.message);
        };
        run_worker(worker, job.clone(), ctx.clone()).await
    }

    /// The record of job `id`, while retained.
    pub async fn job_info(&self, id: JobId) -> Option<JobInfo> {
        self.inner.jobs.get(&id).await
    }

    /// Records of every retained job ordered by `username`, newest first.
    pub fn job_infos_for(&self, username: &str) -> Vec<JobInfo> {
        let mut infos: Vec<JobInfo> = self
            .inner
            .jobs
            .iter()
            .filter(|(_, info)| info.is_owned_by(username))
            .map(|(_, info)| info)
            .collect();
        infos.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        infos
    }
}

async fn run_worker(worker: Arc<dyn Worker>, job: Job, ctx: JobContext) -> WorkerOutcome {
    let kind = job.kind();
    let url = ctx.target.server_url().clone();
    let handle = tokio::spawn(async move { worker.execute(&job, &ctx).await });

    match handle.await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(err)) => {
            tracing::error!(job_kind = %kind, error = %err, "Worker failed");
            fault(&url, err.message)
        }
        Err(join_err) => {
            let message = if join_err.is_panic() {
                panic_message(join_err.into_panic())
            } else {
                "Job was cancelled".to_string()
            };
            tracing::error!(job_kind = %kind, "Worker panicked: {}", message);
            fault(&url, message)
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "Worker panicked".to_string()
    }
}

fn fault(url: &Url, message: String) -> WorkerOutcome {
    WorkerOutcome::new(
        WorkerResult::failure(url.clone(), message.clone(), Some(message), None),
        None,
    )
}
