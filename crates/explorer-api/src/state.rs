//! Application state shared across all handlers.

use std::sync::Arc;

use explorer_auth::{ConfiguredSystemCredentials, CredentialsService, TokenDecoder};
use explorer_cache::CredentialsCache;
use explorer_core::AppResult;
use explorer_core::config::AppConfig;
use explorer_database::ServerRepository;
use explorer_store::StoreClientFactory;
use explorer_worker::workers::default_registry;
use explorer_worker::{BroadcastNotifier, JobQueue};

/// Capacity of the notification channel per subscriber.
const NOTIFICATION_CAPACITY: usize = 256;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session credential cache
    pub cache: CredentialsCache,
    /// Credential resolver
    pub credentials: Arc<CredentialsService>,
    /// WITSML server records
    pub servers: Arc<ServerRepository>,
    /// Builds remote store clients from resolved credentials
    pub store_factory: Arc<dyn StoreClientFactory>,
    /// Job queue
    pub queue: JobQueue,
    /// Refresh and job-finished notifications
    pub notifier: Arc<BroadcastNotifier>,
}

impl AppState {
    /// Wire every component from configuration.
    pub fn build(config: AppConfig, store_factory: Arc<dyn StoreClientFactory>) -> AppResult<Self> {
        config.validate()?;
        let cache = CredentialsCache::new(&config.credentials)?;
        let servers = Arc::new(ServerRepository::from_config(&config.servers));
        let system_credentials = Arc::new(ConfiguredSystemCredentials::from_config(
            &config.auth.system_credentials,
        ));
        let credentials = Arc::new(CredentialsService::new(
            TokenDecoder::new(&config.auth),
            system_credentials,
            servers.clone(),
            cache.clone(),
        ));

        let notifier = Arc::new(BroadcastNotifier::new(NOTIFICATION_CAPACITY));
        let registry = default_registry(&config.worker)?;
        let queue = JobQueue::new(registry, notifier.clone(), &config.worker);

        Ok(Self {
            config: Arc::new(config),
            cache,
            credentials,
            servers,
            store_factory,
            queue,
            notifier,
        })
    }

    /// Whether bearer tokens and system credentials are in use.
    pub fn oauth2_enabled(&self) -> bool {
        self.config.auth.oauth2_enabled
    }
}
