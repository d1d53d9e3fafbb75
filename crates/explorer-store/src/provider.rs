//! Store backend selection.

use std::sync::Arc;

use tracing::info;

use explorer_core::config::StoreConfig;
use explorer_core::error::AppError;
use explorer_core::result::AppResult;

use crate::client::StoreClientFactory;
use crate::memory::MemoryStoreFactory;

/// Create the store client factory named by configuration.
pub fn create_factory(config: &StoreConfig) -> AppResult<Arc<dyn StoreClientFactory>> {
    match config.provider.as_str() {
        "memory" => {
            info!(accounts = config.accounts.len(), "Initializing in-memory store backend");
            Ok(Arc::new(MemoryStoreFactory::from_config(&config.accounts)))
        }
        other => Err(AppError::configuration(format!(
            "Unknown store provider: '{other}'. Supported: memory"
        ))),
    }
}
