//! Bearer token handling.

pub mod claims;
pub mod decoder;

pub use claims::RoleClaims;
pub use decoder::TokenDecoder;
