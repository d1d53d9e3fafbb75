//! Credentials used to reach a remote store.

pub mod model;

pub use model::ServerCredentials;
