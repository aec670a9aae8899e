//! Catalog Service - Business logic layer

use std::sync::Arc;

use async_trait::async_trait;
use domain_pricing::{CatalogLookup, CatalogPriceRef, PricingError, PricingResult};
use tracing::instrument;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CatalogFilter, CatalogItem, CreateCatalogItem, UpdateCatalogItem};
use crate::repository::CatalogRepository;

/// Catalog service providing business logic operations
///
/// Handles validation and duplicate checks, and exposes the catalog to the
/// pricing calculator through the [`CatalogLookup`] seam.
pub struct CatalogService<R: CatalogRepository> {
    repository: Arc<R>,
}

impl<R: CatalogRepository> CatalogService<R> {
    /// Create a new CatalogService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new catalog item
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create_item(&self, input: CreateCatalogItem) -> CatalogResult<CatalogItem> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        if self.repository.exists_by_name(&input.name).await? {
            return Err(CatalogError::DuplicateName(input.name));
        }

        self.repository.create(input).await
    }

    /// Get an item by ID
    #[instrument(skip(self))]
    pub async fn get_item(&self, item_id: &str) -> CatalogResult<CatalogItem> {
        self.repository
            .get_by_id(item_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(item_id.to_string()))
    }

    /// List items with optional filters
    #[instrument(skip(self))]
    pub async fn list_items(&self, filter: CatalogFilter) -> CatalogResult<Vec<CatalogItem>> {
        self.repository.list(filter).await
    }

    /// Update an existing item
    #[instrument(skip(self, input))]
    pub async fn update_item(
        &self,
        item_id: &str,
        input: UpdateCatalogItem,
    ) -> CatalogResult<CatalogItem> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        let existing = self
            .repository
            .get_by_id(item_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(item_id.to_string()))?;

        // Check for duplicate name if the name is being changed
        if let Some(ref new_name) = input.name {
            if new_name != &existing.name && self.repository.exists_by_name(new_name).await? {
                return Err(CatalogError::DuplicateName(new_name.clone()));
            }
        }

        self.repository.update(item_id, input).await
    }

    /// Delete an item
    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_id: &str) -> CatalogResult<()> {
        self.repository.delete(item_id).await
    }

    /// Count items matching a filter
    #[instrument(skip(self))]
    pub async fn count_items(&self, filter: CatalogFilter) -> CatalogResult<u64> {
        self.repository.count(filter).await
    }
}

/// Expose catalog unit prices to the pricing calculator.
#[async_trait]
impl<R: CatalogRepository> CatalogLookup for CatalogService<R> {
    async fn get_item(&self, item_id: &str) -> PricingResult<Option<CatalogPriceRef>> {
        match self.repository.get_by_id(item_id).await {
            Ok(Some(item)) => Ok(Some(CatalogPriceRef {
                item_id: item.item_id,
                name: item.name,
                unit_price: item.unit_price,
                stock_quantity: item.stock_quantity,
            })),
            Ok(None) => Ok(None),
            Err(e) => Err(PricingError::Catalog(e.to_string())),
        }
    }
}

impl<R: CatalogRepository> Clone for CatalogService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogKind;
    use crate::repository::MockCatalogRepository;
    use domain_pricing::Money;

    fn create_input() -> CreateCatalogItem {
        CreateCatalogItem {
            name: "Screwdriver".to_string(),
            description: String::new(),
            kind: CatalogKind::Tool,
            category: None,
            unit_price: 850.0,
            stock_quantity: 4,
            unit: None,
            storage_location: None,
        }
    }

    #[tokio::test]
    async fn test_create_item_rejects_duplicate_name() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_exists_by_name().returning(|_| Ok(true));

        let service = CatalogService::new(repo);
        let err = service.create_item(create_input()).await.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn test_create_item_rejects_invalid_input() {
        let repo = MockCatalogRepository::new();
        let service = CatalogService::new(repo);

        let mut input = create_input();
        input.name = String::new();
        let err = service.create_item(input).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[tokio::test]
    async fn test_get_item_maps_missing_to_not_found() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = CatalogService::new(repo);
        let err = service.get_item("tool_missing1").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_catalog_lookup_projects_price_fields() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_get_by_id().returning(|_| {
            Ok(Some(CatalogItem::new(CreateCatalogItem {
                name: "Screwdriver".to_string(),
                description: String::new(),
                kind: CatalogKind::Tool,
                category: None,
                unit_price: 850.0,
                stock_quantity: 4,
                unit: None,
                storage_location: None,
            })))
        });

        let service = CatalogService::new(repo);
        let price_ref = CatalogLookup::get_item(&service, "tool_whatever")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(price_ref.name, "Screwdriver");
        assert_eq!(price_ref.unit_price, Money::new(850_00));
        assert_eq!(price_ref.stock_quantity, 4);
    }

    #[tokio::test]
    async fn test_catalog_lookup_wraps_repository_errors() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_get_by_id()
            .returning(|_| Err(CatalogError::Database("boom".to_string())));

        let service = CatalogService::new(repo);
        let err = CatalogLookup::get_item(&service, "tool_whatever")
            .await
            .unwrap_err();
        assert!(matches!(err, PricingError::Catalog(_)));
    }
}
