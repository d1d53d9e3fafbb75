//! Custom Axum extractors.

pub mod headers;

pub use headers::RequestHeaders;
