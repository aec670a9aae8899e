//! MongoDB database connector and utilities
//!
//! Provides connection management, health checks, and configuration.

mod config;
mod connector;
mod errors;
mod health;

pub use config::MongoConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_retry,
};
pub use errors::is_duplicate_key_error;
pub use health::{HealthStatus, check_health, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
