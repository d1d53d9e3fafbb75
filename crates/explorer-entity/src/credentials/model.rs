//! Server credentials value object.

use chrono::{DateTime, Utc};
use std::fmt;
use url::Url;

/// A (host, user id, secret) triple used against one remote store.
///
/// Two credentials are equal iff host, user id and password match; the
/// expiry is metadata and does not take part in equality.
#[derive(Clone)]
pub struct ServerCredentials {
    /// Store endpoint the credentials belong to.
    pub host: Url,
    /// User id.
    pub user_id: String,
    /// Plain-text secret. Never logged.
    pub password: String,
    /// When the credentials stop being valid, if known.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ServerCredentials {
    /// Create credentials without an expiry.
    pub fn new(host: Url, user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host,
            user_id: user_id.into(),
            password: password.into(),
            expires_at: None,
        }
    }

    /// Attach an absolute expiry.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether the credentials are expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    /// Whether both user id and password are blank.
    pub fn is_null_or_empty(&self) -> bool {
        self.user_id.is_empty() && self.password.is_empty()
    }
}

impl PartialEq for ServerCredentials {
    fn eq(&self, other: &Self) -> bool {
        self.host == other.host && self.user_id == other.user_id && self.password == other.password
    }
}

impl Eq for ServerCredentials {}

impl fmt::Debug for ServerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerCredentials")
            .field("host", &self.host.as_str())
            .field("user_id", &self.user_id)
            .field("password", &"***")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
