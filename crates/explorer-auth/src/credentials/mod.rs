//! Credential resolution.

pub mod service;

pub use service::CredentialsService;
