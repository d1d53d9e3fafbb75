//! Bulk deletion of sibling objects inside one wellbore.

use async_trait::async_trait;
use tracing;

use explorer_core::AppResult;
use explorer_entity::job::{Job, JobKind};
use explorer_entity::object::{ObjectReferences, ObjectType, WitsmlObject};
use explorer_entity::result::{EntityDescription, RefreshAction, RefreshType};
use explorer_store::OptionsIn;

use crate::context::JobContext;
use crate::executor::{Worker, WorkerOutcome, mismatched};
use crate::fanout::{ItemOutcome, Wording, fan_out, fold};

/// Deletes every referenced object concurrently and folds the outcomes.
#[derive(Debug)]
pub struct DeleteObjectsWorker {
    kind: JobKind,
    fanout: usize,
}

impl DeleteObjectsWorker {
    /// Create a worker for one of the bulk delete job kinds.
    pub fn new(kind: JobKind, fanout: usize) -> Self {
        Self { kind, fanout }
    }
}

#[async_trait]
impl Worker for DeleteObjectsWorker {
    fn job_kind(&self) -> JobKind {
        self.kind
    }

    async fn execute(&self, job: &Job, ctx: &JobContext) -> AppResult<WorkerOutcome> {
        if let Some(rejected) = super::reject_invalid(job, ctx) {
            return Ok(rejected);
        }
        let payload = job
            .as_delete_objects()
            .ok_or_else(|| mismatched(self.kind, job))?;
        Ok(delete_objects(&payload.to_delete, self.kind.object_type(), ctx, self.fanout).await)
    }
}

/// Delete `refs` on the target server, at most `fanout` at a time.
pub(crate) async fn delete_objects(
    refs: &ObjectReferences,
    object_type: ObjectType,
    ctx: &JobContext,
    fanout: usize,
) -> WorkerOutcome {
    let url = ctx.target.server_url().clone();
    let items = refs.object_uids.iter().enumerate();
    let outcomes: Vec<ItemOutcome> = fan_out(items, fanout, move |(index, uid)| async move {
        let query = WitsmlObject::child(object_type, &refs.well_uid, &refs.wellbore_uid, uid);
        let result = ctx
            .target
            .delete_from_store(&query, &OptionsIn::delete(false))
            .await;
        match &result {
            Ok(r) if r.is_successful => tracing::info!(
                well_uid = %refs.well_uid,
                wellbore_uid = %refs.wellbore_uid,
                uid = %uid,
                "Deleted {}",
                object_type
            ),
            Ok(r) => tracing::error!(
                well_uid = %refs.well_uid,
                wellbore_uid = %refs.wellbore_uid,
                uid = %uid,
                reason = r.reason.as_deref().unwrap_or_default(),
                "Failed to delete {}",
                object_type
            ),
            Err(e) => tracing::error!(
                well_uid = %refs.well_uid,
                wellbore_uid = %refs.wellbore_uid,
                uid = %uid,
                reason = %e.message,
                "Failed to delete {}",
                object_type
            ),
        }
        ItemOutcome {
            uid: uid.clone(),
            description: EntityDescription {
                well_name: refs.well_name.clone(),
                wellbore_name: refs.wellbore_name.clone(),
                object_name: Some(refs.name_at(index).unwrap_or(uid).to_string()),
            },
            result,
        }
    })
    .await;

    let refresh = RefreshAction::objects(
        url.clone(),
        &refs.well_uid,
        &refs.wellbore_uid,
        object_type,
        RefreshType::Remove,
    );
    fold(
        &url,
        &outcomes,
        Wording {
            past: "Deleted",
            infinitive: "delete",
            object_type,
        },
        refresh,
    )
}
