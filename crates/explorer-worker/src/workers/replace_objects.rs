//! Replacing objects: delete in the target wellbore, then copy in from the source.

use async_trait::async_trait;
use tracing;

use explorer_core::AppResult;
use explorer_entity::job::{Job, JobKind};
use explorer_entity::result::RefreshType;

use super::copy_objects::copy_objects;
use super::delete_objects::delete_objects;
use crate::context::JobContext;
use crate::executor::{Worker, WorkerOutcome, mismatched};

/// Runs the delete job, and the copy job only when every delete succeeded.
#[derive(Debug)]
pub struct ReplaceObjectsWorker {
    fanout: usize,
}

impl ReplaceObjectsWorker {
    /// Create a worker issuing at most `fanout` remote calls at a time per phase.
    pub fn new(fanout: usize) -> Self {
        Self { fanout }
    }
}

#[async_trait]
impl Worker for ReplaceObjectsWorker {
    fn job_kind(&self) -> JobKind {
        JobKind::ReplaceLogObjects
    }

    async fn execute(&self, job: &Job, ctx: &JobContext) -> AppResult<WorkerOutcome> {
        if let Some(rejected) = super::reject_invalid(job, ctx) {
            return Ok(rejected);
        }
        let Job::ReplaceLogObjects(payload) = job else {
            return Err(mismatched(JobKind::ReplaceLogObjects, job));
        };
        let object_type = JobKind::ReplaceLogObjects.object_type();

        let deleted = delete_objects(&payload.delete_job.to_delete, object_type, ctx, self.fanout).await;
        if !deleted.result.is_success {
            tracing::error!(
                well_uid = %payload.delete_job.to_delete.well_uid,
                wellbore_uid = %payload.delete_job.to_delete.wellbore_uid,
                "Replace stopped before copying: {}",
                deleted.result.message
            );
            return Ok(deleted);
        }

        let copied = copy_objects(
            &payload.copy_job,
            object_type,
            ctx,
            self.fanout,
            RefreshType::Update,
        )
        .await;
        let refresh = copied.refresh.or_else(|| {
            deleted.refresh.map(|mut refresh| {
                refresh.refresh_type = RefreshType::Update;
                refresh
            })
        });
        Ok(WorkerOutcome::new(copied.result, refresh))
    }
}
