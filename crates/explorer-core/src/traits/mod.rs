//! Core traits defined in `explorer-core` and implemented by other crates.

pub mod repository;

pub use repository::DocumentRepository;
