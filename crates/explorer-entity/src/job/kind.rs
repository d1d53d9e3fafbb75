//! Job kind helpers.

use std::fmt;
use std::str::FromStr;

use explorer_core::AppError;

use super::model::JobKind;
use crate::object::ObjectType;

impl JobKind {
    /// The type of object this kind of job acts on.
    pub fn object_type(&self) -> ObjectType {
        match self {
            Self::DeleteWell | Self::ModifyWell | Self::CreateWell | Self::BatchModifyWell => {
                ObjectType::Well
            }
            Self::DeleteWellbore | Self::ModifyWellbore | Self::CreateWellbore => {
                ObjectType::Wellbore
            }
            Self::DeleteMudLog | Self::ModifyMudLog | Self::CreateMudLog => ObjectType::MudLog,
            Self::DeleteTrajectory | Self::CopyTrajectory => ObjectType::Trajectory,
            Self::DeleteTubular | Self::CopyTubular => ObjectType::Tubular,
            Self::DeleteWbGeometrys | Self::ModifyWbGeometry | Self::CreateWbGeometry => {
                ObjectType::WbGeometry
            }
            Self::DeleteRigs | Self::ModifyRig => ObjectType::Rig,
            Self::DeleteRisks | Self::ModifyRisk | Self::CreateRisk => ObjectType::Risk,
            Self::DeleteBhaRuns | Self::ModifyBhaRun | Self::CopyBhaRun => ObjectType::BhaRun,
            Self::DeleteMessageObjects | Self::ModifyMessageObject => ObjectType::Message,
            Self::DeleteLogObjects | Self::CopyLog | Self::ReplaceLogObjects => ObjectType::Log,
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("Unknown job type: {s}")))
    }
}
