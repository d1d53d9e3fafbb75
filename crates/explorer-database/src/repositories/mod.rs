//! Repository implementations.

pub mod server;

pub use server::ServerRepository;
