//! Catalog lookup seam used by the tools/components calculator.

use async_trait::async_trait;

use crate::error::PricingResult;
use crate::models::Money;

/// The slice of a catalog item the calculator needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPriceRef {
    pub item_id: String,
    pub name: String,
    pub unit_price: Money,
    pub stock_quantity: i64,
}

/// Read-only access to catalog unit prices.
///
/// The catalog itself is owned by an external collaborator (inventory
/// management); this trait is the only dependency the calculator has on it.
/// Prices are resolved at calculation time — a price changing between a
/// preview and a submission is tolerated, not detected.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Resolve one catalog item, or `None` when the id is unknown.
    async fn get_item(&self, item_id: &str) -> PricingResult<Option<CatalogPriceRef>>;
}
