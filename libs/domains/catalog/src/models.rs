use chrono::{DateTime, Utc};
use domain_pricing::Money;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Whether a catalog entry is a tool (rentable/sellable hardware) or an
/// electronic component.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CatalogKind {
    Tool,
    Component,
}

impl CatalogKind {
    /// Identifier prefix for items of this kind.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Tool => "tool",
            Self::Component => "comp",
        }
    }
}

/// Catalog item entity - a priced inventory entry stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogItem {
    /// Unique identifier (stored as _id in MongoDB), e.g. `tool_V1StGXR8`
    #[serde(rename = "_id", alias = "item_id")]
    pub item_id: String,
    /// Item name
    pub name: String,
    /// Item description
    #[serde(default)]
    pub description: String,
    pub kind: CatalogKind,
    /// Optional grouping (e.g. "hand tools", "resistors")
    pub category: Option<String>,
    /// Price per unit
    pub unit_price: Money,
    /// Units currently in stock
    pub stock_quantity: i64,
    /// Unit of measure for components (e.g. "pcs", "m")
    pub unit: Option<String>,
    /// Where the item lives in the lab
    pub storage_location: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new catalog item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCatalogItem {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: CatalogKind,
    pub category: Option<String>,
    /// Price per unit in pesos (e.g. 850.00)
    #[validate(range(min = 0.0))]
    pub unit_price: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub stock_quantity: i64,
    pub unit: Option<String>,
    pub storage_location: Option<String>,
}

/// DTO for updating an existing catalog item
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCatalogItem {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 0.0))]
    pub unit_price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock_quantity: Option<i64>,
    pub unit: Option<String>,
    pub storage_location: Option<String>,
}

/// Query filters for listing catalog items
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct CatalogFilter {
    /// Filter by kind (tool/component)
    pub kind: Option<CatalogKind>,
    /// Filter by category
    pub category: Option<String>,
    /// Only items with stock remaining
    pub in_stock: Option<bool>,
    /// Search in name and description
    pub search: Option<String>,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> i64 {
    50
}

impl CatalogItem {
    /// Create a new item from the CreateCatalogItem DTO
    pub fn new(input: CreateCatalogItem) -> Self {
        let now = Utc::now();
        Self {
            item_id: short_id::generate(input.kind.id_prefix()),
            name: input.name,
            description: input.description,
            kind: input.kind,
            category: input.category,
            unit_price: Money::from_decimal(input.unit_price),
            stock_quantity: input.stock_quantity,
            unit: input.unit,
            storage_location: input.storage_location,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from the UpdateCatalogItem DTO
    pub fn apply_update(&mut self, update: UpdateCatalogItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        if let Some(unit_price) = update.unit_price {
            self.unit_price = Money::from_decimal(unit_price);
        }
        if let Some(stock_quantity) = update.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        if let Some(unit) = update.unit {
            self.unit = Some(unit);
        }
        if let Some(storage_location) = update.storage_location {
            self.storage_location = Some(storage_location);
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateCatalogItem {
        CreateCatalogItem {
            name: "Screwdriver".to_string(),
            description: "Phillips #2".to_string(),
            kind: CatalogKind::Tool,
            category: Some("hand tools".to_string()),
            unit_price: 850.0,
            stock_quantity: 4,
            unit: None,
            storage_location: Some("shelf A3".to_string()),
        }
    }

    #[test]
    fn test_new_item_gets_kind_prefixed_id() {
        let item = CatalogItem::new(create_input());
        assert!(short_id::is_valid("tool", &item.item_id));
        assert_eq!(item.unit_price, Money::new(850_00));
    }

    #[test]
    fn test_component_prefix() {
        let mut input = create_input();
        input.kind = CatalogKind::Component;
        let item = CatalogItem::new(input);
        assert!(item.item_id.starts_with("comp_"));
    }

    #[test]
    fn test_apply_update_touches_updated_at_only_fields_set() {
        let mut item = CatalogItem::new(create_input());
        let created = item.created_at;

        item.apply_update(UpdateCatalogItem {
            stock_quantity: Some(3),
            unit_price: Some(900.0),
            ..Default::default()
        });

        assert_eq!(item.name, "Screwdriver");
        assert_eq!(item.stock_quantity, 3);
        assert_eq!(item.unit_price, Money::new(900_00));
        assert_eq!(item.created_at, created);
        assert!(item.updated_at >= created);
    }
}
