//! Job outcomes and tree refresh notifications.

pub mod refresh;
pub mod worker_result;

pub use refresh::{RefreshAction, RefreshType};
pub use worker_result::{EntityDescription, WorkerResult};
