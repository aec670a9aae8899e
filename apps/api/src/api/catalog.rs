//! Catalog API routes

use axum::Router;
use domain_catalog::{CatalogService, MongoCatalogRepository, handlers};
use tracing::info;

use crate::state::AppState;

/// Create the catalog router
pub fn router(state: &AppState) -> Router {
    let repository = MongoCatalogRepository::new(state.db.clone());
    let service = CatalogService::new(repository);

    handlers::router(service)
}

/// Initialize catalog indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoCatalogRepository::new(db.clone());
    repository
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create catalog indexes: {}", e))?;
    info!("Catalog collection indexes created");
    Ok(())
}
