//! Deletion of a single well, wellbore, or wellbore object.

use async_trait::async_trait;

use explorer_core::AppResult;
use explorer_entity::job::{Job, JobKind};
use explorer_entity::object::WitsmlObject;
use explorer_entity::result::{EntityDescription, RefreshAction, RefreshType, WorkerResult};
use explorer_store::OptionsIn;

use crate::context::JobContext;
use crate::executor::{Worker, WorkerOutcome, mismatched};

/// Deletes one entity and reports a removal refresh on success.
#[derive(Debug)]
pub struct DeleteObjectWorker {
    kind: JobKind,
}

/// What to delete and how to report it.
struct Deletion {
    query: WitsmlObject,
    cascaded_delete: bool,
    refresh: RefreshAction,
    display_name: String,
    well_name: Option<String>,
    wellbore_name: Option<String>,
}

impl DeleteObjectWorker {
    /// Create a worker for one of the single-delete job kinds.
    pub fn new(kind: JobKind) -> Self {
        Self { kind }
    }

    fn plan(&self, job: &Job, ctx: &JobContext) -> AppResult<Deletion> {
        let url = ctx.target.server_url().clone();
        match job {
            Job::DeleteWell(p) => {
                let well = &p.to_delete;
                Ok(Deletion {
                    query: WitsmlObject::well(&well.well_uid),
                    cascaded_delete: p.cascaded_delete,
                    refresh: RefreshAction::well(url, Some(well.well_uid.clone()), RefreshType::Remove),
                    display_name: well.well_name.clone().unwrap_or_else(|| well.well_uid.clone()),
                    well_name: well.well_name.clone(),
                    wellbore_name: None,
                })
            }
            Job::DeleteWellbore(p) => {
                let wellbore = &p.to_delete;
                Ok(Deletion {
                    query: WitsmlObject::wellbore(&wellbore.well_uid, &wellbore.wellbore_uid),
                    cascaded_delete: p.cascaded_delete,
                    refresh: RefreshAction::wellbore(
                        url,
                        &wellbore.well_uid,
                        &wellbore.wellbore_uid,
                        RefreshType::Remove,
                    ),
                    display_name: wellbore
                        .wellbore_name
                        .clone()
                        .unwrap_or_else(|| wellbore.wellbore_uid.clone()),
                    well_name: wellbore.well_name.clone(),
                    wellbore_name: wellbore.wellbore_name.clone(),
                })
            }
            _ => {
                let object = &job
                    .as_delete_object()
                    .ok_or_else(|| mismatched(self.kind, job))?
                    .to_delete;
                let object_type = self.kind.object_type();
                Ok(Deletion {
                    query: WitsmlObject::child(
                        object_type,
                        &object.well_uid,
                        &object.wellbore_uid,
                        &object.uid,
                    ),
                    cascaded_delete: false,
                    refresh: RefreshAction::objects(
                        url,
                        &object.well_uid,
                        &object.wellbore_uid,
                        object_type,
                        RefreshType::Remove,
                    )
                    .with_object_uids(vec![object.uid.clone()]),
                    display_name: object.name.clone().unwrap_or_else(|| object.uid.clone()),
                    well_name: object.well_name.clone(),
                    wellbore_name: object.wellbore_name.clone(),
                })
            }
        }
    }

    /// Best-effort lookup of the entity's name after a failed delete.
    async fn describe_failure(
        &self,
        deletion: &Deletion,
        ctx: &JobContext,
    ) -> Option<EntityDescription> {
        let found = ctx
            .target
            .get_from_store(&deletion.query, &OptionsIn::id_only())
            .await
            .ok()?;
        let object = found.into_iter().next()?;
        Some(EntityDescription {
            well_name: object.well_name.or_else(|| deletion.well_name.clone()),
            wellbore_name: object.wellbore_name.or_else(|| deletion.wellbore_name.clone()),
            object_name: object.name,
        })
    }
}

#[async_trait]
impl Worker for DeleteObjectWorker {
    fn job_kind(&self) -> JobKind {
        self.kind
    }

    async fn execute(&self, job: &Job, ctx: &JobContext) -> AppResult<WorkerOutcome> {
        if let Some(rejected) = super::reject_invalid(job, ctx) {
            return Ok(rejected);
        }
        let deletion = self.plan(job, ctx)?;
        let query = &deletion.query;
        let object_type = query.object_type;
        let url = ctx.target.server_url().clone();

        let (succeeded, reason) = match ctx
            .target
            .delete_from_store(query, &OptionsIn::delete(deletion.cascaded_delete))
            .await
        {
            Ok(result) => (result.is_successful, result.reason),
            Err(e) => (false, Some(e.message)),
        };

        if succeeded {
            tracing::info!(
                well_uid = query.owning_well_uid().unwrap_or_default(),
                wellbore_uid = query.owning_wellbore_uid().unwrap_or_default(),
                uid = %query.uid,
                "Deleted {}",
                object_type
            );
            let message = format!("Deleted {}: {}", object_type, deletion.display_name);
            return Ok(WorkerOutcome::new(
                WorkerResult::success(url, message),
                Some(deletion.refresh),
            ));
        }

        tracing::error!(
            well_uid = query.owning_well_uid().unwrap_or_default(),
            wellbore_uid = query.owning_wellbore_uid().unwrap_or_default(),
            uid = %query.uid,
            reason = reason.as_deref().unwrap_or_default(),
            "Failed to delete {}",
            object_type
        );
        let description = self.describe_failure(&deletion, ctx).await;
        Ok(WorkerOutcome::new(
            WorkerResult::failure(
                url,
                format!("Failed to delete {}", object_type),
                reason,
                description,
            ),
            None,
        ))
    }
}
