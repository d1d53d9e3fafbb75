//! Server configuration entity.

use serde::{Deserialize, Serialize};
use url::Url;

use explorer_core::types::id::ServerId;

/// A configured WITSML server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    /// Unique server identifier.
    pub id: ServerId,
    /// Display name.
    pub name: String,
    /// Store endpoint.
    pub url: Url,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Authentication scheme (`Basic` or `OAuth2`).
    #[serde(default)]
    pub security_scheme: String,
    /// Roles allowed to use the system credentials of this server.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Server {
    /// Whether this server's endpoint is `url` (compared as parsed URLs).
    pub fn has_url(&self, url: &Url) -> bool {
        self.url == *url
    }
}

/// Data required to create a server record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServer {
    /// Display name.
    pub name: String,
    /// Store endpoint.
    pub url: Url,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Authentication scheme.
    #[serde(default = "default_security_scheme")]
    pub security_scheme: String,
    /// Allowed roles.
    #[serde(default)]
    pub roles: Vec<String>,
}

fn default_security_scheme() -> String {
    "Basic".to_string()
}

impl CreateServer {
    /// Materialize into a server with a fresh id.
    pub fn into_server(self) -> Server {
        Server {
            id: ServerId::new(),
            name: self.name,
            url: self.url,
            description: self.description,
            security_scheme: self.security_scheme,
            roles: self.roles,
        }
    }
}

/// Partial update of a server record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServer {
    /// New display name.
    pub name: Option<String>,
    /// New endpoint.
    pub url: Option<Url>,
    /// New description.
    pub description: Option<String>,
    /// New authentication scheme.
    pub security_scheme: Option<String>,
    /// New role list.
    pub roles: Option<Vec<String>>,
}

impl UpdateServer {
    /// Apply the present fields onto `server`.
    pub fn apply(self, server: &mut Server) {
        if let Some(name) = self.name {
            server.name = name;
        }
        if let Some(url) = self.url {
            server.url = url;
        }
        if let Some(description) = self.description {
            server.description = description;
        }
        if let Some(scheme) = self.security_scheme {
            server.security_scheme = scheme;
        }
        if let Some(roles) = self.roles {
            server.roles = roles;
        }
    }
}
