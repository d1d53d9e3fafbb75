//! Cache key for credential entries.

use std::fmt;
use url::Url;

/// Identifies one cached credential: the session that logged in and the
/// server it logged in to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialsKey {
    /// Session identifier (token subject or session cookie value).
    pub session_id: String,
    /// Server endpoint. Compared as a parsed URL, so scheme and host casing
    /// and a trailing slash do not matter.
    pub host: Url,
}

impl CredentialsKey {
    /// Build a key.
    pub fn new(session_id: impl Into<String>, host: Url) -> Self {
        Self {
            session_id: session_id.into(),
            host,
        }
    }
}

impl fmt::Display for CredentialsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "explorer:credentials:{}:{}", self.session_id, self.host)
    }
}
