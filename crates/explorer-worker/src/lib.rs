//! # explorer-worker
//!
//! Job execution for WITSML Explorer: the worker dispatch table, the job
//! queue that drives each job to a single outcome, bounded fan-out for bulk
//! workers, refresh notifications, and scheduled cache maintenance.

pub mod context;
pub mod executor;
pub mod fanout;
pub mod notifier;
pub mod queue;
pub mod scheduler;
pub mod workers;

#[cfg(test)]
pub(crate) mod testing;

pub use context::JobContext;
pub use executor::{Worker, WorkerOutcome, WorkerRegistry};
pub use notifier::{BroadcastNotifier, Notification, RefreshNotifier};
pub use queue::{JobQueue, JobTicket};
pub use scheduler::MaintenanceScheduler;
