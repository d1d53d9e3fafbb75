//! # explorer-store
//!
//! The seam between WITSML Explorer and remote WITSML stores.
//!
//! [`RemoteStoreClient`] is the opaque remote procedure every worker talks
//! to; [`StoreClientFactory`] builds one per set of credentials. The
//! `memory` backend keeps objects in process and is used for development
//! and tests.

pub mod client;
pub mod memory;
pub mod provider;
pub mod query;

pub use client::{RemoteStoreClient, StoreClientFactory};
pub use memory::{MemoryStore, MemoryStoreFactory};
pub use provider::create_factory;
pub use query::{OptionsIn, QueryResult, ReturnElements};
