//! Modification of a single object.

use async_trait::async_trait;

use explorer_core::AppResult;
use explorer_entity::job::{Job, JobKind};

use super::{Write, check_object_type, write_object};
use crate::context::JobContext;
use crate::executor::{Worker, WorkerOutcome, mismatched};

/// Updates the fields present in the payload object.
#[derive(Debug)]
pub struct ModifyObjectWorker {
    kind: JobKind,
}

impl ModifyObjectWorker {
    /// Create a worker for one of the modify job kinds.
    pub fn new(kind: JobKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl Worker for ModifyObjectWorker {
    fn job_kind(&self) -> JobKind {
        self.kind
    }

    async fn execute(&self, job: &Job, ctx: &JobContext) -> AppResult<WorkerOutcome> {
        if let Some(rejected) = super::reject_invalid(job, ctx) {
            return Ok(rejected);
        }
        let object = &job
            .as_modify_object()
            .ok_or_else(|| mismatched(self.kind, job))?
            .object;
        if let Err(err) = check_object_type(self.kind, object) {
            return Ok(WorkerOutcome::rejected(ctx.target.server_url(), &err));
        }
        write_object(object, ctx, Write::Update).await
    }
}
