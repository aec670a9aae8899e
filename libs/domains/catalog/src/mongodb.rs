//! MongoDB implementation of CatalogRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::doc,
    options::IndexOptions,
};
use tracing::instrument;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{CatalogFilter, CatalogItem, CreateCatalogItem, UpdateCatalogItem};
use crate::repository::CatalogRepository;

/// MongoDB implementation of the CatalogRepository
#[derive(Clone)]
pub struct MongoCatalogRepository {
    collection: Collection<CatalogItem>,
}

impl MongoCatalogRepository {
    /// Create a new MongoCatalogRepository on the `catalog_items` collection
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<CatalogItem>("catalog_items");
        Self { collection }
    }

    /// Create indexes for efficient querying
    pub async fn create_indexes(&self) -> CatalogResult<()> {
        let indexes = vec![
            // Item names are unique across the whole catalog
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            // Compound index for the kind/category browse queries
            IndexModel::builder()
                .keys(doc! { "kind": 1, "category": 1 })
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        Ok(())
    }

    /// Build a MongoDB filter document from CatalogFilter
    fn build_filter(filter: &CatalogFilter) -> mongodb::bson::Document {
        let mut doc = doc! {};

        if let Some(ref kind) = filter.kind {
            doc.insert("kind", kind.to_string());
        }

        if let Some(ref category) = filter.category {
            doc.insert("category", category);
        }

        if let Some(true) = filter.in_stock {
            doc.insert("stock_quantity", doc! { "$gt": 0 });
        }

        if let Some(ref search) = filter.search {
            doc.insert(
                "$or",
                vec![
                    doc! { "name": { "$regex": search, "$options": "i" } },
                    doc! { "description": { "$regex": search, "$options": "i" } },
                ],
            );
        }

        doc
    }
}

#[async_trait]
impl CatalogRepository for MongoCatalogRepository {
    #[instrument(skip(self, input), fields(item_name = %input.name))]
    async fn create(&self, input: CreateCatalogItem) -> CatalogResult<CatalogItem> {
        let item = CatalogItem::new(input);

        self.collection.insert_one(&item).await?;

        tracing::info!(item_id = %item.item_id, "Catalog item created successfully");
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, item_id: &str) -> CatalogResult<Option<CatalogItem>> {
        let item = self.collection.find_one(doc! { "_id": item_id }).await?;
        Ok(item)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: CatalogFilter) -> CatalogResult<Vec<CatalogItem>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "name": 1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let items: Vec<CatalogItem> = cursor.try_collect().await?;

        Ok(items)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, item_id: &str, input: UpdateCatalogItem) -> CatalogResult<CatalogItem> {
        let filter = doc! { "_id": item_id };
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or_else(|| CatalogError::NotFound(item_id.to_string()))?;

        let mut updated = existing;
        updated.apply_update(input);

        self.collection.replace_one(filter, &updated).await?;

        tracing::info!(item_id = %item_id, "Catalog item updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, item_id: &str) -> CatalogResult<()> {
        let result = self.collection.delete_one(doc! { "_id": item_id }).await?;

        if result.deleted_count == 0 {
            return Err(CatalogError::NotFound(item_id.to_string()));
        }

        tracing::info!(item_id = %item_id, "Catalog item deleted successfully");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: CatalogFilter) -> CatalogResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> CatalogResult<bool> {
        let count = self.collection.count_documents(doc! { "name": name }).await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogKind;

    #[test]
    fn test_build_filter_empty() {
        let doc = MongoCatalogRepository::build_filter(&CatalogFilter::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_kind() {
        let filter = CatalogFilter {
            kind: Some(CatalogKind::Component),
            ..Default::default()
        };
        let doc = MongoCatalogRepository::build_filter(&filter);
        assert_eq!(doc.get_str("kind").unwrap(), "component");
    }

    #[test]
    fn test_build_filter_in_stock_only_when_true() {
        let filter = CatalogFilter {
            in_stock: Some(false),
            ..Default::default()
        };
        assert!(MongoCatalogRepository::build_filter(&filter).is_empty());

        let filter = CatalogFilter {
            in_stock: Some(true),
            ..Default::default()
        };
        assert!(MongoCatalogRepository::build_filter(&filter).contains_key("stock_quantity"));
    }

    #[test]
    fn test_build_filter_with_search() {
        let filter = CatalogFilter {
            search: Some("resistor".to_string()),
            ..Default::default()
        };
        let doc = MongoCatalogRepository::build_filter(&filter);
        assert!(doc.contains_key("$or"));
    }
}
