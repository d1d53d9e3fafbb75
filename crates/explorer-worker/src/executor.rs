//! Worker trait and the dispatch table from job kind to worker.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing;
use url::Url;

use explorer_core::error::AppError;
use explorer_core::result::AppResult;
use explorer_entity::job::{Job, JobKind};
use explorer_entity::result::{RefreshAction, WorkerResult};

use crate::context::JobContext;

/// The single outcome of one job.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerOutcome {
    /// Reportable result.
    pub result: WorkerResult,
    /// Tree refresh, present only when the job made a durable change.
    pub refresh: Option<RefreshAction>,
}

impl WorkerOutcome {
    /// Build an outcome.
    pub fn new(result: WorkerResult, refresh: Option<RefreshAction>) -> Self {
        Self { result, refresh }
    }

    /// A job rejected before any remote call.
    pub fn rejected(server_url: &Url, error: &AppError) -> Self {
        Self {
            result: WorkerResult::failure(
                server_url.clone(),
                error.message.clone(),
                Some(error.message.clone()),
                None,
            ),
            refresh: None,
        }
    }
}

/// Executes one kind of job against remote stores.
///
/// Validation failures and remote rejections are reported through the
/// returned outcome. `Err` is a fault; the queue converts it into a failed
/// result.
#[async_trait]
pub trait Worker: Send + Sync + std::fmt::Debug {
    /// The job kind this worker executes.
    fn job_kind(&self) -> JobKind;

    /// Execute the job.
    async fn execute(&self, job: &Job, ctx: &JobContext) -> AppResult<WorkerOutcome>;
}

/// Error for a job routed to a worker of another kind.
pub(crate) fn mismatched(worker: JobKind, job: &Job) -> AppError {
    AppError::worker(format!(
        "Worker for '{worker}' received a job of type '{}'",
        job.kind()
    ))
}

/// Dispatches jobs to the worker registered for their kind.
#[derive(Debug, Default)]
pub struct WorkerRegistry {
    workers: HashMap<JobKind, Arc<dyn Worker>>,
}

impl WorkerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a worker. A second worker for the same kind is rejected.
    pub fn register(&mut self, worker: Arc<dyn Worker>) -> AppResult<()> {
        let kind = worker.job_kind();
        if self.workers.contains_key(&kind) {
            return Err(AppError::conflict(format!(
                "A worker for job type '{kind}' is already registered"
            )));
        }
        tracing::info!("Registered worker for job type '{}'", kind);
        self.workers.insert(kind, worker);
        Ok(())
    }

    /// The worker registered for `kind`.
    pub fn get(&self, kind: JobKind) -> Option<Arc<dyn Worker>> {
        self.workers.get(&kind).cloned()
    }

    /// Check if a worker is registered for `kind`.
    pub fn has_worker(&self, kind: JobKind) -> bool {
        self.workers.contains_key(&kind)
    }

    /// Registered kinds in declaration order.
    pub fn registered_kinds(&self) -> Vec<JobKind> {
        let mut kinds: Vec<JobKind> = self.workers.keys().copied().collect();
        kinds.sort();
        kinds
    }
}
