//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use url::Url;
use validator::Validate;

use explorer_entity::server::CreateServer;

/// Credentials submitted for interactive login to a server.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeRequest {
    /// User id on the target server.
    #[validate(length(min = 1, message = "UserId is required"))]
    pub user_id: String,
    /// Password on the target server.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Query string of the authorize endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeQuery {
    /// Cache the credentials with the long TTL.
    #[serde(default)]
    pub keep_logged_in: bool,
}

/// New WITSML server record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServerRequest {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    /// Server endpoint.
    pub url: Url,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Authentication scheme.
    #[serde(default)]
    pub security_scheme: Option<String>,
    /// Roles allowed to use the server's system credentials.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl From<CreateServerRequest> for CreateServer {
    fn from(req: CreateServerRequest) -> Self {
        Self {
            name: req.name,
            url: req.url,
            description: req.description,
            security_scheme: req.security_scheme.unwrap_or_else(|| "Basic".to_string()),
            roles: req.roles,
        }
    }
}
