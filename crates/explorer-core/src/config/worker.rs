//! Job queue and worker configuration.

use serde::{Deserialize, Serialize};

/// Job execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of jobs executed concurrently by the queue.
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,
    /// Maximum in-flight remote calls per bulk job.
    #[serde(default = "default_max_fanout")]
    pub max_fanout: usize,
    /// How long finished job records stay available for polling.
    #[serde(default = "default_job_retention")]
    pub job_retention_minutes: u64,
    /// Upper bound on retained job records.
    #[serde(default = "default_max_job_records")]
    pub max_job_records: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: default_max_concurrent_jobs(),
            max_fanout: default_max_fanout(),
            job_retention_minutes: default_job_retention(),
            max_job_records: default_max_job_records(),
        }
    }
}

fn default_max_concurrent_jobs() -> usize {
    16
}

fn default_max_fanout() -> usize {
    8
}

fn default_job_retention() -> u64 {
    24 * 60
}

fn default_max_job_records() -> u64 {
    5000
}
