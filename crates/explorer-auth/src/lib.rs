//! # explorer-auth
//!
//! Credential resolution for WITSML Explorer.
//!
//! ## Modules
//!
//! - `jwt`: bearer token claim decoding
//! - `headers`: the request headers that drive credential resolution
//! - `roles`: role intersection between token and server configuration
//! - `system`: read-only system credential store
//! - `credentials`: the resolver deciding between system, cached, or no credentials

pub mod credentials;
pub mod headers;
pub mod jwt;
pub mod roles;
pub mod system;

pub use credentials::CredentialsService;
pub use headers::EssentialHeaders;
pub use jwt::{RoleClaims, TokenDecoder};
pub use system::{ConfiguredSystemCredentials, SystemCredentialsStore};
