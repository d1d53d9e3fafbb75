//! Remote store client traits.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use explorer_core::AppResult;
use explorer_entity::credentials::ServerCredentials;
use explorer_entity::object::WitsmlObject;

use crate::query::{OptionsIn, QueryResult};

/// A client bound to one remote store and one set of credentials.
///
/// Every method may be called concurrently from many tasks. A rejected
/// write is reported as an unsuccessful [`QueryResult`]; `Err` is reserved
/// for transport and authentication failures.
#[async_trait]
pub trait RemoteStoreClient: Send + Sync + Debug + 'static {
    /// Read the objects matching `query`.
    async fn get_from_store(
        &self,
        query: &WitsmlObject,
        options: &OptionsIn,
    ) -> AppResult<Vec<WitsmlObject>>;

    /// Create `object`.
    async fn add_to_store(&self, object: &WitsmlObject) -> AppResult<QueryResult>;

    /// Update the fields present in `object`.
    async fn update_in_store(&self, object: &WitsmlObject) -> AppResult<QueryResult>;

    /// Delete the objects matching `query`.
    async fn delete_from_store(
        &self,
        query: &WitsmlObject,
        options: &OptionsIn,
    ) -> AppResult<QueryResult>;

    /// Verify that the store accepts the client's credentials.
    async fn test_connection(&self) -> AppResult<()>;

    /// The store endpoint.
    fn server_url(&self) -> &Url;
}

/// Builds clients for a given set of credentials.
pub trait StoreClientFactory: Send + Sync + Debug + 'static {
    /// Create a client that authenticates with `credentials` against
    /// `credentials.host`.
    fn create_client(&self, credentials: &ServerCredentials)
    -> AppResult<Arc<dyn RemoteStoreClient>>;
}
