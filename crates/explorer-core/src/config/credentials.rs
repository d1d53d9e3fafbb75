//! Per-user credential cache configuration.

use serde::{Deserialize, Serialize};

/// Credential cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Lifetime of a cached credential in hours.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: f64,
    /// Lifetime used when the user asks to stay logged in.
    #[serde(default = "default_keep_logged_in_hours")]
    pub keep_logged_in_ttl_hours: f64,
    /// Re-extend the expiry by the original TTL on every cache hit.
    #[serde(default)]
    pub sliding_expiration: bool,
    /// Maximum number of cached credentials.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Base64-encoded 32-byte key protecting cached secrets.
    ///
    /// A random key is generated at startup when absent, which invalidates
    /// all cached credentials on restart.
    #[serde(default)]
    pub protection_key: Option<String>,
    /// Cron expression for the expired-credential sweep.
    #[serde(default = "default_sweep_schedule")]
    pub sweep_schedule: String,
    /// Name of the session cookie used when OAuth2 is disabled.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            keep_logged_in_ttl_hours: default_keep_logged_in_hours(),
            sliding_expiration: false,
            max_capacity: default_max_capacity(),
            protection_key: None,
            sweep_schedule: default_sweep_schedule(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_ttl_hours() -> f64 {
    1.0
}

fn default_keep_logged_in_hours() -> f64 {
    24.0
}

fn default_max_capacity() -> u64 {
    10000
}

fn default_sweep_schedule() -> String {
    "0 */5 * * * *".to_string()
}

fn default_cookie_name() -> String {
    "witsmlexplorer".to_string()
}
