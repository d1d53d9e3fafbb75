//! The closed set of jobs and their kind tags.

use serde::{Deserialize, Serialize};

use super::payload::{
    BatchModifyWellJob, CopyObjectsJob, CreateObjectJob, DeleteObjectJob, DeleteObjectsJob,
    DeleteWellJob, DeleteWellboreJob, JobPayload, ModifyObjectJob, ReplaceObjectsJob,
};

/// Generates [`Job`], [`JobKind`], and the mapping between them from one list.
macro_rules! define_jobs {
    ($( $(#[$meta:meta])* $kind:ident($payload:ty) ),+ $(,)?) => {
        /// A user-initiated unit of work. Immutable after creation.
        ///
        /// Serialized as `{ "jobType": "<Kind>", "payload": { ... } }`.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "jobType", content = "payload")]
        pub enum Job {
            $( $(#[$meta])* $kind($payload), )+
        }

        /// Tag identifying the variant of a [`Job`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum JobKind {
            $( $(#[$meta])* $kind, )+
        }

        impl JobKind {
            /// Every job kind, in declaration order.
            pub const ALL: &'static [JobKind] = &[$(JobKind::$kind),+];

            /// The kind name as it appears on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$kind => stringify!($kind), )+
                }
            }
        }

        impl Job {
            /// The kind tag of this job.
            pub fn kind(&self) -> JobKind {
                match self {
                    $( Self::$kind(_) => JobKind::$kind, )+
                }
            }

            /// The payload of this job behind its common interface.
            pub fn payload(&self) -> &dyn JobPayload {
                match self {
                    $( Self::$kind(payload) => payload as &dyn JobPayload, )+
                }
            }
        }
    };
}

define_jobs! {
    /// Delete a well.
    DeleteWell(DeleteWellJob),
    /// Delete a wellbore.
    DeleteWellbore(DeleteWellboreJob),
    /// Delete a mud log.
    DeleteMudLog(DeleteObjectJob),
    /// Delete a trajectory.
    DeleteTrajectory(DeleteObjectJob),
    /// Delete a tubular.
    DeleteTubular(DeleteObjectJob),
    /// Delete a set of wellbore geometries.
    DeleteWbGeometrys(DeleteObjectsJob),
    /// Delete a set of rigs.
    DeleteRigs(DeleteObjectsJob),
    /// Delete a set of risks.
    DeleteRisks(DeleteObjectsJob),
    /// Delete a set of BHA runs.
    DeleteBhaRuns(DeleteObjectsJob),
    /// Delete a set of message objects.
    DeleteMessageObjects(DeleteObjectsJob),
    /// Delete a set of logs.
    DeleteLogObjects(DeleteObjectsJob),
    /// Modify a well.
    ModifyWell(ModifyObjectJob),
    /// Modify a wellbore.
    ModifyWellbore(ModifyObjectJob),
    /// Modify a rig.
    ModifyRig(ModifyObjectJob),
    /// Modify a risk.
    ModifyRisk(ModifyObjectJob),
    /// Modify a mud log.
    ModifyMudLog(ModifyObjectJob),
    /// Modify a wellbore geometry.
    ModifyWbGeometry(ModifyObjectJob),
    /// Modify a BHA run.
    ModifyBhaRun(ModifyObjectJob),
    /// Modify a message object.
    ModifyMessageObject(ModifyObjectJob),
    /// Create a well.
    CreateWell(CreateObjectJob),
    /// Create a wellbore.
    CreateWellbore(CreateObjectJob),
    /// Create a risk.
    CreateRisk(CreateObjectJob),
    /// Create a mud log.
    CreateMudLog(CreateObjectJob),
    /// Create a wellbore geometry.
    CreateWbGeometry(CreateObjectJob),
    /// Modify several wells at once.
    BatchModifyWell(BatchModifyWellJob),
    /// Copy logs from a source wellbore to a target wellbore.
    CopyLog(CopyObjectsJob),
    /// Copy trajectories from a source wellbore to a target wellbore.
    CopyTrajectory(CopyObjectsJob),
    /// Copy tubulars from a source wellbore to a target wellbore.
    CopyTubular(CopyObjectsJob),
    /// Copy BHA runs from a source wellbore to a target wellbore.
    CopyBhaRun(CopyObjectsJob),
    /// Delete logs in a target wellbore, then copy replacements into it.
    ReplaceLogObjects(ReplaceObjectsJob),
}

impl Job {
    /// Human-readable summary of what the job does, prefixed by its kind.
    pub fn description(&self) -> String {
        format!("{} - {}", self.kind(), self.payload().describe())
    }

    /// Name(s) of the object(s) the job acts on.
    pub fn object_name(&self) -> Option<String> {
        self.payload().object_name()
    }

    /// Name of the well the job acts in.
    pub fn well_name(&self) -> Option<String> {
        self.payload().well_name()
    }

    /// Name of the wellbore the job acts in.
    pub fn wellbore_name(&self) -> Option<String> {
        self.payload().wellbore_name()
    }

    /// Whether the job reads from a second (source) server.
    pub fn requires_source_server(&self) -> bool {
        matches!(
            self.kind(),
            JobKind::CopyLog
                | JobKind::CopyTrajectory
                | JobKind::CopyTubular
                | JobKind::CopyBhaRun
                | JobKind::ReplaceLogObjects
        )
    }

    /// The single-object delete payload, if this is such a job.
    pub fn as_delete_object(&self) -> Option<&DeleteObjectJob> {
        match self {
            Self::DeleteMudLog(p) | Self::DeleteTrajectory(p) | Self::DeleteTubular(p) => Some(p),
            _ => None,
        }
    }

    /// The bulk delete payload, if this is such a job.
    pub fn as_delete_objects(&self) -> Option<&DeleteObjectsJob> {
        match self {
            Self::DeleteWbGeometrys(p)
            | Self::DeleteRigs(p)
            | Self::DeleteRisks(p)
            | Self::DeleteBhaRuns(p)
            | Self::DeleteMessageObjects(p)
            | Self::DeleteLogObjects(p) => Some(p),
            _ => None,
        }
    }

    /// The modify payload, if this is such a job.
    pub fn as_modify_object(&self) -> Option<&ModifyObjectJob> {
        match self {
            Self::ModifyWell(p)
            | Self::ModifyWellbore(p)
            | Self::ModifyRig(p)
            | Self::ModifyRisk(p)
            | Self::ModifyMudLog(p)
            | Self::ModifyWbGeometry(p)
            | Self::ModifyBhaRun(p)
            | Self::ModifyMessageObject(p) => Some(p),
            _ => None,
        }
    }

    /// The create payload, if this is such a job.
    pub fn as_create_object(&self) -> Option<&CreateObjectJob> {
        match self {
            Self::CreateWell(p)
            | Self::CreateWellbore(p)
            | Self::CreateRisk(p)
            | Self::CreateMudLog(p)
            | Self::CreateWbGeometry(p) => Some(p),
            _ => None,
        }
    }

    /// The copy payload, if this is such a job.
    pub fn as_copy_objects(&self) -> Option<&CopyObjectsJob> {
        match self {
            Self::CopyLog(p) | Self::CopyTrajectory(p) | Self::CopyTubular(p) | Self::CopyBhaRun(p) => {
                Some(p)
            }
            _ => None,
        }
    }
}
