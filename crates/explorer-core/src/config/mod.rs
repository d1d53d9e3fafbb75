//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! optional TOML files and `EXPLORER__`-prefixed environment variables. Each
//! sub-module represents a logical configuration section.

pub mod app;
pub mod auth;
pub mod credentials;
pub mod logging;
pub mod store;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::app::{ServerConfig, ServerEntryConfig};
pub use self::auth::{AuthConfig, SystemCredentialConfig};
pub use self::credentials::CredentialsConfig;
pub use self::logging::LoggingConfig;
pub use self::store::{StoreAccountConfig, StoreConfig};
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// configuration (default.toml + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Bearer token and system credential settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Per-user credential cache settings.
    #[serde(default)]
    pub credentials: CredentialsConfig,
    /// Job queue and worker settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Remote store backend settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// WITSML server records loaded into the server repository at startup.
    #[serde(default)]
    pub servers: Vec<ServerEntryConfig>,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges `config/default.toml`, an environment-specific overlay
    /// `config/{env}.toml`, and environment variables prefixed with
    /// `EXPLORER__` (nested keys separated by `__`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("EXPLORER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single TOML file (used by tests and tools).
    pub fn from_file(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;
        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that would leave the service insecure.
    ///
    /// With OAuth on, signature verification against an empty secret would
    /// accept any token HMAC-signed with the empty key.
    pub fn validate(&self) -> Result<(), AppError> {
        let auth = &self.auth;
        if auth.oauth2_enabled && auth.verify_token_signature && auth.jwt_secret.is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set when auth.oauth2_enabled and auth.verify_token_signature are on",
            ));
        }
        Ok(())
    }
}
