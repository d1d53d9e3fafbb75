//! Server configuration repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};
use url::Url;

use explorer_core::config::ServerEntryConfig;
use explorer_core::error::AppError;
use explorer_core::result::AppResult;
use explorer_core::traits::DocumentRepository;
use explorer_core::types::id::ServerId;
use explorer_entity::server::Server;

/// Repository of configured WITSML servers.
#[derive(Debug, Clone, Default)]
pub struct ServerRepository {
    servers: Arc<RwLock<HashMap<ServerId, Server>>>,
}

impl ServerRepository {
    /// Create a repository holding `servers`.
    pub fn with_servers(servers: Vec<Server>) -> Self {
        let map = servers.into_iter().map(|s| (s.id, s)).collect();
        Self {
            servers: Arc::new(RwLock::new(map)),
        }
    }

    /// Create a repository seeded from configuration.
    ///
    /// Entries with an unparsable URL are skipped with a warning.
    pub fn from_config(entries: &[ServerEntryConfig]) -> Self {
        let servers: Vec<Server> = entries
            .iter()
            .filter_map(|entry| match Url::parse(&entry.url) {
                Ok(url) => Some(Server {
                    id: ServerId::new(),
                    name: entry.name.clone(),
                    url,
                    description: entry.description.clone(),
                    security_scheme: entry.security_scheme.clone(),
                    roles: entry.roles.clone(),
                }),
                Err(e) => {
                    warn!(name = %entry.name, url = %entry.url, error = %e, "Skipping server with invalid URL");
                    None
                }
            })
            .collect();
        info!(count = servers.len(), "Loaded server configuration");
        Self::with_servers(servers)
    }

    /// Find the server whose endpoint is `url`.
    pub async fn find_by_url(&self, url: &Url) -> AppResult<Option<Server>> {
        let servers = self.servers.read().await;
        Ok(servers.values().find(|s| s.has_url(url)).cloned())
    }
}

#[async_trait]
impl DocumentRepository<Server, ServerId> for ServerRepository {
    async fn get_document(&self, id: &ServerId) -> AppResult<Option<Server>> {
        Ok(self.servers.read().await.get(id).cloned())
    }

    async fn get_documents(&self) -> AppResult<Vec<Server>> {
        let servers = self.servers.read().await;
        let mut list: Vec<Server> = servers.values().cloned().collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(list)
    }

    async fn create_document(&self, document: Server) -> AppResult<Server> {
        let mut servers = self.servers.write().await;
        if servers.contains_key(&document.id) {
            return Err(AppError::conflict(format!(
                "Server {} already exists",
                document.id
            )));
        }
        if servers.values().any(|s| s.has_url(&document.url)) {
            return Err(AppError::conflict(format!(
                "A server with URL {} already exists",
                document.url
            )));
        }
        servers.insert(document.id, document.clone());
        Ok(document)
    }

    async fn update_document(&self, id: &ServerId, mut document: Server) -> AppResult<Server> {
        let mut servers = self.servers.write().await;
        if !servers.contains_key(id) {
            return Err(AppError::not_found(format!("Server {id} not found")));
        }
        document.id = *id;
        servers.insert(*id, document.clone());
        Ok(document)
    }

    async fn delete_document(&self, id: &ServerId) -> AppResult<bool> {
        Ok(self.servers.write().await.remove(id).is_some())
    }
}
