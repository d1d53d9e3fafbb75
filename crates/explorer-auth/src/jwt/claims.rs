//! Claims read from a caller's bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The role-authorization context of one request. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleClaims {
    /// Application roles granted to the caller.
    #[serde(default)]
    pub roles: Vec<String>,
    /// User principal name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upn: Option<String>,
    /// Subject, used as the session id in OAuth mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl RoleClaims {
    /// Returns the expiration as a `DateTime<Utc>`.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Checks whether this token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// The best available display name for the caller.
    pub fn username(&self) -> Option<&str> {
        self.upn.as_deref().or(self.sub.as_deref())
    }
}
