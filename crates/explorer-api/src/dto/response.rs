//! Response DTOs.

use serde::{Deserialize, Serialize};

use explorer_core::types::id::JobId;
use explorer_entity::server::Server;

/// Returned when a job is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCreatedResponse {
    /// Identifier to poll with.
    pub job_id: JobId,
}

/// A server record with the usernames the caller is logged in with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerResponse {
    /// The server record.
    #[serde(flatten)]
    pub server: Server,
    /// Usernames usable without logging in again.
    pub current_usernames: Vec<String>,
}

/// Result of a logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeauthorizeResponse {
    /// Number of cached credentials evicted.
    pub removed: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Crate version.
    pub version: String,
}
