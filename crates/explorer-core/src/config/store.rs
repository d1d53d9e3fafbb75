//! Remote store backend configuration.

use serde::{Deserialize, Serialize};

/// Remote store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store backend. Only `"memory"` ships with this build.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Accounts accepted by the in-memory backend.
    #[serde(default)]
    pub accounts: Vec<StoreAccountConfig>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            accounts: Vec::new(),
        }
    }
}

/// An account on a remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreAccountConfig {
    /// Server URL.
    pub host: String,
    /// Username.
    pub user_id: String,
    /// Password.
    pub password: String,
}

fn default_provider() -> String {
    "memory".to_string()
}
