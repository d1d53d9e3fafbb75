//! Job lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a job.
///
/// `Created → Running → {Succeeded | PartiallySucceeded | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    /// Accepted by the queue, not yet started.
    Created,
    /// A worker is executing the job.
    Running,
    /// Every remote operation succeeded.
    Succeeded,
    /// Some, but not all, remote operations of a bulk job succeeded.
    PartiallySucceeded,
    /// The job failed without any durable change.
    Failed,
}

impl JobStatus {
    /// Check if the job is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::PartiallySucceeded | Self::Failed
        )
    }

    /// Terminal status for a finished job.
    ///
    /// A failed job that still produced a refresh action made a durable change
    /// to part of its targets and is therefore partially successful.
    pub fn from_outcome(is_success: bool, has_refresh: bool) -> Self {
        match (is_success, has_refresh) {
            (true, _) => Self::Succeeded,
            (false, true) => Self::PartiallySucceeded,
            (false, false) => Self::Failed,
        }
    }

    /// Return the status as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Running => "Running",
            Self::Succeeded => "Succeeded",
            Self::PartiallySucceeded => "PartiallySucceeded",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
