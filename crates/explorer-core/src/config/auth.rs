//! Bearer token and system credential configuration.

use serde::{Deserialize, Serialize};

/// Authentication configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Whether requests are authenticated with OAuth2 bearer tokens.
    ///
    /// When disabled, sessions are identified by a cookie and system
    /// credentials are never handed out.
    #[serde(default)]
    pub oauth2_enabled: bool,
    /// Verify the bearer token signature with `jwt_secret`.
    ///
    /// Disable when an upstream gateway has already verified the token.
    #[serde(default)]
    pub verify_token_signature: bool,
    /// Shared secret for HS256 signature verification.
    #[serde(default)]
    pub jwt_secret: String,
    /// Clock skew tolerance in seconds for token expiry.
    #[serde(default = "default_leeway")]
    pub token_leeway_seconds: u64,
    /// Server-wide credentials usable by sufficiently authorized callers.
    #[serde(default)]
    pub system_credentials: Vec<SystemCredentialConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            oauth2_enabled: false,
            verify_token_signature: false,
            jwt_secret: String::new(),
            token_leeway_seconds: default_leeway(),
            system_credentials: Vec::new(),
        }
    }
}

/// One system credential triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemCredentialConfig {
    /// Server URL the credential belongs to.
    pub host: String,
    /// Username on the remote server.
    pub user_id: String,
    /// Password on the remote server.
    pub password: String,
}

fn default_leeway() -> u64 {
    5
}
