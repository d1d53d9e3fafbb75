//! # explorer-database
//!
//! Repository implementations for WITSML Explorer configuration documents.
//! Server records are held in process memory and seeded from configuration.

pub mod repositories;

pub use repositories::ServerRepository;
