//! Donations Domain
//!
//! Records monetary and in-kind contributions as an append-only ledger.
//! A raw [`CreateDonation`] payload is first run through the
//! type-conditional validation in [`models::CreateDonation::validated`],
//! producing a [`models::ValidatedDonation`] variant that carries exactly
//! the fields legal for its type. Only validated donations reach the
//! repository, and records are immutable once written.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{DonationError, DonationResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateDonation, DonationFilter, DonationRecord, DonationStats, DonationType, ItemCondition,
    ValidatedDonation,
};
pub use mongodb::MongoDonationRepository;
pub use repository::DonationRepository;
pub use service::DonationService;
