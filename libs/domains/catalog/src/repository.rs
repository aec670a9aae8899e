use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{CatalogFilter, CatalogItem, CreateCatalogItem, UpdateCatalogItem};

/// Repository trait for catalog item persistence
///
/// Implementations can use different storage backends (MongoDB, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Create a new catalog item
    async fn create(&self, input: CreateCatalogItem) -> CatalogResult<CatalogItem>;

    /// Get an item by its prefixed identifier
    async fn get_by_id(&self, item_id: &str) -> CatalogResult<Option<CatalogItem>>;

    /// List items with optional filters
    async fn list(&self, filter: CatalogFilter) -> CatalogResult<Vec<CatalogItem>>;

    /// Update an existing item
    async fn update(&self, item_id: &str, input: UpdateCatalogItem) -> CatalogResult<CatalogItem>;

    /// Delete an item
    async fn delete(&self, item_id: &str) -> CatalogResult<()>;

    /// Count items matching a filter
    async fn count(&self, filter: CatalogFilter) -> CatalogResult<u64>;

    /// Check if an item name exists
    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool>;
}
