//! Copying objects from a source wellbore to a target wellbore.

use async_trait::async_trait;
use tracing;

use explorer_core::AppResult;
use explorer_entity::job::{CopyObjectsJob, Job, JobKind};
use explorer_entity::object::{ObjectType, WitsmlObject};
use explorer_entity::result::{EntityDescription, RefreshAction, RefreshType};
use explorer_store::{OptionsIn, QueryResult};

use crate::context::JobContext;
use crate::executor::{Worker, WorkerOutcome, mismatched};
use crate::fanout::{ItemOutcome, Wording, fan_out, fold};

/// Reads each source object and adds it below the target wellbore.
#[derive(Debug)]
pub struct CopyObjectsWorker {
    kind: JobKind,
    fanout: usize,
}

impl CopyObjectsWorker {
    /// Create a worker for one of the copy job kinds.
    pub fn new(kind: JobKind, fanout: usize) -> Self {
        Self { kind, fanout }
    }
}

#[async_trait]
impl Worker for CopyObjectsWorker {
    fn job_kind(&self) -> JobKind {
        self.kind
    }

    async fn execute(&self, job: &Job, ctx: &JobContext) -> AppResult<WorkerOutcome> {
        if let Some(rejected) = super::reject_invalid(job, ctx) {
            return Ok(rejected);
        }
        let payload = job
            .as_copy_objects()
            .ok_or_else(|| mismatched(self.kind, job))?;
        Ok(copy_objects(
            payload,
            self.kind.object_type(),
            ctx,
            self.fanout,
            RefreshType::Add,
        )
        .await)
    }
}

/// Copy one object: read it from the source and add it to the target.
async fn copy_one(
    job: &CopyObjectsJob,
    object_type: ObjectType,
    uid: &str,
    ctx: &JobContext,
) -> AppResult<QueryResult> {
    let source = ctx.require_source()?;
    let query = WitsmlObject::child(object_type, &job.source.well_uid, &job.source.wellbore_uid, uid);
    let Some(mut object) = source
        .get_from_store(&query, &OptionsIn::all())
        .await?
        .into_iter()
        .next()
    else {
        return Ok(QueryResult::failure(format!(
            "Could not find {} with uid {} on the source server",
            object_type, uid
        )));
    };

    let target = &job.target;
    object.well_uid = Some(target.well_uid.clone());
    object.wellbore_uid = Some(target.wellbore_uid.clone());
    object.well_name = target.well_name.clone();
    object.wellbore_name = target.wellbore_name.clone();
    ctx.target.add_to_store(&object).await
}

/// Copy every referenced source object, at most `fanout` at a time.
pub(crate) async fn copy_objects(
    job: &CopyObjectsJob,
    object_type: ObjectType,
    ctx: &JobContext,
    fanout: usize,
    refresh_type: RefreshType,
) -> WorkerOutcome {
    let url = ctx.target.server_url().clone();
    if let Err(err) = ctx.require_source() {
        return WorkerOutcome::rejected(&url, &err);
    }

    let items = job.source.object_uids.iter().enumerate();
    let outcomes: Vec<ItemOutcome> = fan_out(items, fanout, move |(index, uid)| async move {
        let result = copy_one(job, object_type, uid, ctx).await;
        match &result {
            Ok(r) if r.is_successful => tracing::info!(
                well_uid = %job.target.well_uid,
                wellbore_uid = %job.target.wellbore_uid,
                uid = %uid,
                "Copied {}",
                object_type
            ),
            Ok(r) => tracing::error!(
                well_uid = %job.target.well_uid,
                wellbore_uid = %job.target.wellbore_uid,
                uid = %uid,
                reason = r.reason.as_deref().unwrap_or_default(),
                "Failed to copy {}",
                object_type
            ),
            Err(e) => tracing::error!(
                well_uid = %job.target.well_uid,
                wellbore_uid = %job.target.wellbore_uid,
                uid = %uid,
                reason = %e.message,
                "Failed to copy {}",
                object_type
            ),
        }
        ItemOutcome {
            uid: uid.clone(),
            description: EntityDescription {
                well_name: job.target.well_name.clone(),
                wellbore_name: job.target.wellbore_name.clone(),
                object_name: Some(job.source.name_at(index).unwrap_or(uid).to_string()),
            },
            result,
        }
    })
    .await;

    let refresh = RefreshAction::objects(
        url.clone(),
        &job.target.well_uid,
        &job.target.wellbore_uid,
        object_type,
        refresh_type,
    );
    fold(
        &url,
        &outcomes,
        Wording {
            past: "Copied",
            infinitive: "copy",
            object_type,
        },
        refresh,
    )
}
