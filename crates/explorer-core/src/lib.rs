//! # explorer-core
//!
//! Core crate for WITSML Explorer. Contains configuration schemas, core
//! traits, typed identifiers, and the unified error system.
//!
//! This crate has **no** internal dependencies on other explorer crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
