//! Payments API routes
//!
//! Wires the payments domain to HTTP routes: the payment service prices
//! usage through the catalog-backed calculator before recording.

use axum::Router;
use domain_catalog::{CatalogService, MongoCatalogRepository};
use domain_payments::{MongoPaymentRepository, PaymentService, handlers};
use domain_pricing::CostCalculator;
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

/// Create the payments router
pub fn router(state: &AppState) -> Router {
    // Catalog lookups back the tools/components calculator
    let catalog = CatalogService::new(MongoCatalogRepository::new(state.db.clone()));
    let calculator = CostCalculator::new(state.rates.clone(), Arc::new(catalog));

    let repository = MongoPaymentRepository::new(state.db.clone());
    let service = PaymentService::new(repository, calculator);

    handlers::router(service)
}

/// Initialize payment indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoPaymentRepository::new(db.clone());
    repository
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create payment indexes: {}", e))?;
    info!("Payment collection indexes created");
    Ok(())
}
