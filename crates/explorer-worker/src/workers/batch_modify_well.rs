//! Concurrent modification of several wells.

use async_trait::async_trait;
use tracing;

use explorer_core::AppResult;
use explorer_entity::job::{Job, JobKind};
use explorer_entity::object::ObjectType;
use explorer_entity::result::{EntityDescription, RefreshAction, RefreshType};

use crate::context::JobContext;
use crate::executor::{Worker, WorkerOutcome, mismatched};
use crate::fanout::{ItemOutcome, Wording, fan_out, fold};

/// Updates every well in the batch and folds the outcomes.
#[derive(Debug)]
pub struct BatchModifyWellWorker {
    fanout: usize,
}

impl BatchModifyWellWorker {
    /// Create a worker issuing at most `fanout` updates at a time.
    pub fn new(fanout: usize) -> Self {
        Self { fanout }
    }
}

#[async_trait]
impl Worker for BatchModifyWellWorker {
    fn job_kind(&self) -> JobKind {
        JobKind::BatchModifyWell
    }

    async fn execute(&self, job: &Job, ctx: &JobContext) -> AppResult<WorkerOutcome> {
        if let Some(rejected) = super::reject_invalid(job, ctx) {
            return Ok(rejected);
        }
        let Job::BatchModifyWell(payload) = job else {
            return Err(mismatched(JobKind::BatchModifyWell, job));
        };
        for well in &payload.wells {
            if let Err(err) = super::check_object_type(JobKind::BatchModifyWell, well) {
                return Ok(WorkerOutcome::rejected(ctx.target.server_url(), &err));
            }
        }

        let url = ctx.target.server_url().clone();
        let outcomes: Vec<ItemOutcome> = fan_out(&payload.wells, self.fanout, move |well| async move {
            let result = ctx.target.update_in_store(well).await;
            match &result {
                Ok(r) if r.is_successful => tracing::info!(uid = %well.uid, "Updated well"),
                Ok(r) => tracing::error!(
                    uid = %well.uid,
                    reason = r.reason.as_deref().unwrap_or_default(),
                    "Failed to update well"
                ),
                Err(e) => tracing::error!(uid = %well.uid, reason = %e.message, "Failed to update well"),
            }
            ItemOutcome {
                uid: well.uid.clone(),
                description: EntityDescription {
                    well_name: well.name.clone(),
                    ..EntityDescription::default()
                },
                result,
            }
        })
        .await;

        Ok(fold(
            &url,
            &outcomes,
            Wording {
                past: "Updated",
                infinitive: "update",
                object_type: ObjectType::Well,
            },
            RefreshAction::well(url.clone(), None, RefreshType::Update),
        ))
    }
}
