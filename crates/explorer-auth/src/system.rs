//! Read-only store of system credentials.

use std::fmt::Debug;

use tracing::warn;
use url::Url;

use explorer_core::config::SystemCredentialConfig;
use explorer_entity::credentials::ServerCredentials;

/// Source of server-wide credentials handed out to authorized callers.
pub trait SystemCredentialsStore: Send + Sync + Debug + 'static {
    /// Every system credential configured for `host`.
    fn find_by_host(&self, host: &Url) -> Vec<ServerCredentials>;
}

/// System credentials loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredSystemCredentials {
    credentials: Vec<ServerCredentials>,
}

impl ConfiguredSystemCredentials {
    /// Load from configuration. Entries with an unparsable host are skipped.
    pub fn from_config(entries: &[SystemCredentialConfig]) -> Self {
        let credentials = entries
            .iter()
            .filter_map(|entry| match Url::parse(&entry.host) {
                Ok(host) => Some(ServerCredentials::new(
                    host,
                    entry.user_id.clone(),
                    entry.password.clone(),
                )),
                Err(e) => {
                    warn!(host = %entry.host, error = %e, "Skipping system credential with invalid host");
                    None
                }
            })
            .collect();
        Self { credentials }
    }

    /// Build from already-parsed credentials.
    pub fn new(credentials: Vec<ServerCredentials>) -> Self {
        Self { credentials }
    }
}

impl SystemCredentialsStore for ConfiguredSystemCredentials {
    fn find_by_host(&self, host: &Url) -> Vec<ServerCredentials> {
        self.credentials
            .iter()
            .filter(|c| c.host == *host)
            .cloned()
            .collect()
    }
}
