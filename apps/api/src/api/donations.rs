//! Donations API routes

use axum::Router;
use domain_donations::{DonationService, MongoDonationRepository, handlers};
use tracing::info;

use crate::state::AppState;

/// Create the donations router
pub fn router(state: &AppState) -> Router {
    let repository = MongoDonationRepository::new(state.db.clone());
    let service = DonationService::new(repository);

    handlers::router(service)
}

/// Initialize donation indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    let repository = MongoDonationRepository::new(db.clone());
    repository
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create donation indexes: {}", e))?;
    info!("Donation collection indexes created");
    Ok(())
}
