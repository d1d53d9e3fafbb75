//! Generic document repository trait for configuration records.

use async_trait::async_trait;

use crate::result::AppResult;

/// Generic CRUD repository over documents keyed by `Id`.
///
/// Each entity gets a strongly typed repository. Entity-specific lookups
/// are defined on the concrete repository structs.
#[async_trait]
pub trait DocumentRepository<Entity, Id>: Send + Sync + std::fmt::Debug + 'static
where
    Entity: Send + Sync + 'static,
    Id: Send + Sync + 'static,
{
    /// Fetch a document by its identifier.
    async fn get_document(&self, id: &Id) -> AppResult<Option<Entity>>;

    /// Fetch every document.
    async fn get_documents(&self) -> AppResult<Vec<Entity>>;

    /// Insert a new document and return it as stored.
    async fn create_document(&self, document: Entity) -> AppResult<Entity>;

    /// Replace an existing document and return it as stored.
    async fn update_document(&self, id: &Id, document: Entity) -> AppResult<Entity>;

    /// Delete a document. Returns `true` if it existed.
    async fn delete_document(&self, id: &Id) -> AppResult<bool>;
}
