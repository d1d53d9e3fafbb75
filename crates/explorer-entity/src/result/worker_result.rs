//! The single reportable outcome of a job.

use serde::{Deserialize, Serialize};
use url::Url;

/// Names identifying the entity a result is about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDescription {
    /// Well name.
    pub well_name: Option<String>,
    /// Wellbore name.
    pub wellbore_name: Option<String>,
    /// Object name.
    pub object_name: Option<String>,
}

/// Outcome of one job. Exactly one is produced per job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerResult {
    /// Server the job acted on.
    pub server_url: Url,
    /// Whether every remote operation succeeded.
    pub is_success: bool,
    /// Human-readable summary.
    pub message: String,
    /// Failure reason reported by the remote store or the fault.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// The entity the failure is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<EntityDescription>,
}

impl WorkerResult {
    /// A successful outcome.
    pub fn success(server_url: Url, message: impl Into<String>) -> Self {
        Self {
            server_url,
            is_success: true,
            message: message.into(),
            reason: None,
            description: None,
        }
    }

    /// A failed outcome.
    pub fn failure(
        server_url: Url,
        message: impl Into<String>,
        reason: Option<String>,
        description: Option<EntityDescription>,
    ) -> Self {
        Self {
            server_url,
            is_success: false,
            message: message.into(),
            reason,
            description,
        }
    }
}
