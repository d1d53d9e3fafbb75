//! # explorer-cache
//!
//! Process-wide cache of per-session server credentials for WITSML Explorer.
//!
//! Secrets are never held in plain text: every entry stores an AES-256-GCM
//! protected copy of the password, keyed by `(session id, server host)` and
//! bounded by an absolute expiry.

pub mod credentials;
pub mod keys;
pub mod protector;

pub use credentials::CredentialsCache;
pub use keys::CredentialsKey;
pub use protector::SecretProtector;
