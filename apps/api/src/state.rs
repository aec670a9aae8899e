//! Application state management.
//!
//! Shared state constructed once at startup and handed to the route
//! builders. The rate table lives here so pricing constants are injected
//! explicitly instead of being read from ambient globals.

use domain_pricing::RateTable;
use mongodb::{Client, Database};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares the underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
    /// Pricing constants, read-only after startup
    pub rates: RateTable,
}
