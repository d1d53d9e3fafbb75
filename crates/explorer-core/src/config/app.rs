//! HTTP server and server-record configuration.

use serde::{Deserialize, Serialize};

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed by the CORS layer. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// A WITSML server record seeded into the server repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerEntryConfig {
    /// Display name.
    pub name: String,
    /// Server URL.
    pub url: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Security scheme, e.g. `"Basic"` or `"OAuth2"`.
    #[serde(default = "default_security_scheme")]
    pub security_scheme: String,
    /// Token roles allowed to use the server's system credentials.
    #[serde(default)]
    pub roles: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_security_scheme() -> String {
    "Basic".to_string()
}
