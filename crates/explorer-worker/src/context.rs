//! Per-job execution context.

use std::sync::Arc;

use explorer_core::error::AppError;
use explorer_core::result::AppResult;
use explorer_store::RemoteStoreClient;

/// Everything a worker needs besides the job itself.
#[derive(Debug, Clone)]
pub struct JobContext {
    /// Client for the server the job writes to.
    pub target: Arc<dyn RemoteStoreClient>,
    /// Client for the server copy jobs read from.
    pub source: Option<Arc<dyn RemoteStoreClient>>,
    /// The caller that ordered the job.
    pub username: Option<String>,
    /// User id used against the target server.
    pub target_username: Option<String>,
    /// User id used against the source server.
    pub source_username: Option<String>,
}

impl JobContext {
    /// Context for a job against `target` only.
    pub fn new(target: Arc<dyn RemoteStoreClient>) -> Self {
        Self {
            target,
            source: None,
            username: None,
            target_username: None,
            source_username: None,
        }
    }

    /// Attach the source server client.
    pub fn with_source(mut self, source: Arc<dyn RemoteStoreClient>) -> Self {
        self.source = Some(source);
        self
    }

    /// Attach the ordering user.
    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username;
        self
    }

    /// Attach the remote user ids in use.
    pub fn with_store_users(mut self, target: Option<String>, source: Option<String>) -> Self {
        self.target_username = target;
        self.source_username = source;
        self
    }

    /// The source client, or a validation error when the job was submitted
    /// without one.
    pub fn require_source(&self) -> AppResult<&Arc<dyn RemoteStoreClient>> {
        self.source
            .as_ref()
            .ok_or_else(|| AppError::validation("A source server is required for this job"))
    }
}
