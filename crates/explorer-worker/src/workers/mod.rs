//! Job workers, one per job kind.

pub mod batch_modify_well;
pub mod copy_objects;
pub mod create;
pub mod delete_object;
pub mod delete_objects;
pub mod modify;
pub mod replace_objects;

use std::sync::Arc;

use tracing;

use explorer_core::config::WorkerConfig;
use explorer_core::{AppError, AppResult};
use explorer_entity::job::{Job, JobKind};
use explorer_entity::object::{ObjectType, WitsmlObject};
use explorer_entity::result::{EntityDescription, RefreshAction, RefreshType, WorkerResult};
use url::Url;

use crate::context::JobContext;
use crate::executor::{WorkerOutcome, WorkerRegistry};

pub use batch_modify_well::BatchModifyWellWorker;
pub use copy_objects::CopyObjectsWorker;
pub use create::CreateObjectWorker;
pub use delete_object::DeleteObjectWorker;
pub use delete_objects::DeleteObjectsWorker;
pub use modify::ModifyObjectWorker;
pub use replace_objects::ReplaceObjectsWorker;

/// Build a registry with a worker for every job kind.
pub fn default_registry(config: &WorkerConfig) -> AppResult<WorkerRegistry> {
    let fanout = config.max_fanout;
    let mut registry = WorkerRegistry::new();
    for kind in JobKind::ALL.iter().copied() {
        match kind {
            JobKind::DeleteWell
            | JobKind::DeleteWellbore
            | JobKind::DeleteMudLog
            | JobKind::DeleteTrajectory
            | JobKind::DeleteTubular => {
                registry.register(Arc::new(DeleteObjectWorker::new(kind)))?
            }
            JobKind::DeleteWbGeometrys
            | JobKind::DeleteRigs
            | JobKind::DeleteRisks
            | JobKind::DeleteBhaRuns
            | JobKind::DeleteMessageObjects
            | JobKind::DeleteLogObjects => {
                registry.register(Arc::new(DeleteObjectsWorker::new(kind, fanout)))?
            }
            JobKind::ModifyWell
            | JobKind::ModifyWellbore
            | JobKind::ModifyRig
            | JobKind::ModifyRisk
            | JobKind::ModifyMudLog
            | JobKind::ModifyWbGeometry
            | JobKind::ModifyBhaRun
            | JobKind::ModifyMessageObject => {
                registry.register(Arc::new(ModifyObjectWorker::new(kind)))?
            }
            JobKind::CreateWell
            | JobKind::CreateWellbore
            | JobKind::CreateRisk
            | JobKind::CreateMudLog
            | JobKind::CreateWbGeometry => {
                registry.register(Arc::new(CreateObjectWorker::new(kind)))?
            }
            JobKind::BatchModifyWell => {
                registry.register(Arc::new(BatchModifyWellWorker::new(fanout)))?
            }
            JobKind::CopyLog | JobKind::CopyTrajectory | JobKind::CopyTubular | JobKind::CopyBhaRun => {
                registry.register(Arc::new(CopyObjectsWorker::new(kind, fanout)))?
            }
            JobKind::ReplaceLogObjects => {
                registry.register(Arc::new(ReplaceObjectsWorker::new(fanout)))?
            }
        }
    }
    tracing::info!("Registered workers for {} job types", JobKind::ALL.len());
    Ok(registry)
}

/// Reject a job whose payload is incomplete before any remote call is made.
pub(crate) fn reject_invalid(job: &Job, ctx: &JobContext) -> Option<WorkerOutcome> {
    let err = job.payload().validate().err()?;
    tracing::error!(job_kind = %job.kind(), reason = %err.message, "Job rejected");
    Some(WorkerOutcome::rejected(ctx.target.server_url(), &err))
}

/// The refresh action for a change to a single entity.
pub(crate) fn refresh_for(url: Url, object: &WitsmlObject, refresh_type: RefreshType) -> RefreshAction {
    let well_uid = object.owning_well_uid().unwrap_or_default();
    match object.object_type {
        ObjectType::Well => RefreshAction::well(url, Some(object.uid.clone()), refresh_type),
        ObjectType::Wellbore => RefreshAction::wellbore(url, well_uid, &object.uid, refresh_type),
        object_type => RefreshAction::objects(
            url,
            well_uid,
            object.owning_wellbore_uid().unwrap_or_default(),
            object_type,
            refresh_type,
        )
        .with_object_uids(vec![object.uid.clone()]),
    }
}

/// How a single-object write is carried out and reported.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Write {
    Create,
    Update,
}

impl Write {
    fn past(self) -> &'static str {
        match self {
            Self::Create => "Created",
            Self::Update => "Updated",
        }
    }

    fn infinitive(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }

    fn refresh_type(self) -> RefreshType {
        match self {
            Self::Create => RefreshType::Add,
            Self::Update => RefreshType::Update,
        }
    }
}

/// Check that a payload object has the type its job kind acts on.
pub(crate) fn check_object_type(kind: JobKind, object: &WitsmlObject) -> AppResult<()> {
    if object.object_type != kind.object_type() {
        return Err(AppError::validation(format!(
            "{} cannot act on a {}",
            kind, object.object_type
        )));
    }
    Ok(())
}

/// Create or update one object on the target server.
pub(crate) async fn write_object(
    object: &WitsmlObject,
    ctx: &JobContext,
    write: Write,
) -> AppResult<WorkerOutcome> {
    let url = ctx.target.server_url().clone();
    let written = match write {
        Write::Create => ctx.target.add_to_store(object).await,
        Write::Update => ctx.target.update_in_store(object).await,
    };
    let (succeeded, reason) = match written {
        Ok(result) => (result.is_successful, result.reason),
        Err(e) => (false, Some(e.message)),
    };
    let display_name = object.name.as_deref().unwrap_or(object.uid.as_str());

    if succeeded {
        tracing::info!(
            well_uid = object.owning_well_uid().unwrap_or_default(),
            wellbore_uid = object.owning_wellbore_uid().unwrap_or_default(),
            uid = %object.uid,
            "{} {}",
            write.past(),
            object.object_type
        );
        return Ok(WorkerOutcome::new(
            WorkerResult::success(
                url.clone(),
                format!("{} {}: {}", write.past(), object.object_type, display_name),
            ),
            Some(refresh_for(url, object, write.refresh_type())),
        ));
    }

    tracing::error!(
        well_uid = object.owning_well_uid().unwrap_or_default(),
        wellbore_uid = object.owning_wellbore_uid().unwrap_or_default(),
        uid = %object.uid,
        reason = reason.as_deref().unwrap_or_default(),
        "Failed to {} {}",
        write.infinitive(),
        object.object_type
    );
    Ok(WorkerOutcome::new(
        WorkerResult::failure(
            url,
            format!("Failed to {} {}", write.infinitive(), object.object_type),
            reason,
            Some(EntityDescription {
                well_name: object.well_name.clone(),
                wellbore_name: object.wellbore_name.clone(),
                object_name: Some(display_name.to_string()),
            }),
        ),
        None,
    ))
}
