//! Pollable job records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use explorer_core::types::id::JobId;

use super::model::{Job, JobKind};
use super::status::JobStatus;
use crate::result::WorkerResult;

/// The queue's record of one job, kept for client polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    /// Job identifier.
    pub id: JobId,
    /// Job kind.
    pub job_type: JobKind,
    /// Job description.
    pub description: String,
    /// Object name(s) the job acts on.
    pub object_name: Option<String>,
    /// Well name the job acts in.
    pub well_name: Option<String>,
    /// Wellbore name the job acts in.
    pub wellbore_name: Option<String>,
    /// The user principal (or session user) that ordered the job.
    pub username: Option<String>,
    /// User id used against the target server.
    pub witsml_target_username: Option<String>,
    /// User id used against the source server.
    pub witsml_source_username: Option<String>,
    /// Target server URL.
    pub target_server: Option<String>,
    /// Source server URL.
    pub source_server: Option<String>,
    /// Current status.
    pub status: JobStatus,
    /// When the job was accepted.
    pub start_time: DateTime<Utc>,
    /// When the job finished.
    pub end_time: Option<DateTime<Utc>>,
    /// Reason reported by the worker on failure.
    pub failed_reason: Option<String>,
    /// The published outcome once finished.
    pub result: Option<WorkerResult>,
}

impl JobInfo {
    /// Create a record for a freshly accepted job.
    pub fn new(id: JobId, job: &Job) -> Self {
        Self {
            id,
            job_type: job.kind(),
            description: job.description(),
            object_name: job.object_name(),
            well_name: job.well_name(),
            wellbore_name: job.wellbore_name(),
            username: None,
            witsml_target_username: None,
            witsml_source_username: None,
            target_server: None,
            source_server: None,
            status: JobStatus::Created,
            start_time: Utc::now(),
            end_time: None,
            failed_reason: None,
            result: None,
        }
    }

    /// Mark the job as picked up by a worker.
    pub fn mark_running(&mut self) {
        self.status = JobStatus::Running;
    }

    /// Record the final outcome.
    pub fn finish(&mut self, result: WorkerResult, has_refresh: bool) {
        self.status = JobStatus::from_outcome(result.is_success, has_refresh);
        self.end_time = Some(Utc::now());
        if !result.is_success {
            self.failed_reason = result.reason.clone().or_else(|| Some(result.message.clone()));
        }
        self.result = Some(result);
    }

    /// Whether the record belongs to `username`.
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.username.as_deref() == Some(username)
    }
}
