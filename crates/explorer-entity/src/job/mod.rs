//! Job domain entities.

pub mod info;
pub mod kind;
pub mod model;
pub mod payload;
pub mod status;

pub use info::JobInfo;
pub use model::{Job, JobKind};
pub use payload::{
    BatchModifyWellJob, CopyObjectsJob, CreateObjectJob, DeleteObjectJob, DeleteObjectsJob,
    DeleteWellJob, DeleteWellboreJob, JobPayload, ModifyObjectJob, ReplaceObjectsJob,
};
pub use status::JobStatus;
