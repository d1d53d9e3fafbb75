//! # explorer-entity
//!
//! Domain models for WITSML Explorer. Every type in this crate is a plain
//! value object: jobs and their payloads, job records, worker results,
//! refresh notifications, server configuration records, and credentials.

pub mod credentials;
pub mod job;
pub mod object;
pub mod result;
pub mod server;
