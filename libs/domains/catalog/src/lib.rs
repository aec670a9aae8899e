//! Catalog Domain
//!
//! Tool and component inventory backing the makerspace's purchase pricing.
//! Items carry a unit price and stock quantity; the pricing domain reads
//! them through the [`domain_pricing::CatalogLookup`] seam, while the admin
//! API manages them through the usual handlers → service → repository
//! layers.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{CatalogService, MongoCatalogRepository, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("makerlab");
//!
//! let repository = MongoCatalogRepository::new(db);
//! let service = CatalogService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{CatalogFilter, CatalogItem, CatalogKind, CreateCatalogItem, UpdateCatalogItem};
pub use mongodb::MongoCatalogRepository;
pub use repository::CatalogRepository;
pub use service::CatalogService;
