//! Creation of a single object.

use async_trait::async_trait;

use explorer_core::AppResult;
use explorer_entity::job::{Job, JobKind};

use super::{Write, check_object_type, write_object};
use crate::context::JobContext;
use crate::executor::{Worker, WorkerOutcome, mismatched};

/// Adds the payload object to the target server.
#[derive(Debug)]
pub struct CreateObjectWorker {
    kind: JobKind,
}

impl CreateObjectWorker {
    /// Create a worker for one of the create job kinds.
    pub fn new(kind: JobKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl Worker for CreateObjectWorker {
    fn job_kind(&self) -> JobKind {
        self.kind
    }

    async fn execute(&self, job: &Job, ctx: &JobContext) -> AppResult<WorkerOutcome> {
        if let Some(rejected) = super::reject_invalid(job, ctx) {
            return Ok(rejected);
        }
        let object = &job
            .as_create_object()
            .ok_or_else(|| mismatched(self.kind, job))?
            .object;
        if let Err(err) = check_object_type(self.kind, object) {
            return Ok(WorkerOutcome::rejected(ctx.target.server_url(), &err));
        }
        write_object(object, ctx, Write::Create).await
    }
}
