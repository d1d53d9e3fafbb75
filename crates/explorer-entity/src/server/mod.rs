//! WITSML server configuration records.

pub mod model;

pub use model::{CreateServer, Server, UpdateServer};
