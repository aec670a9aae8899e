//! Payments Domain
//!
//! Records service payments as an append-only ledger. A payment request
//! carries a usage description; the pricing calculator turns it into a
//! [`domain_pricing::CostBreakdown`], and the resulting record keeps the
//! full breakdown for audit alongside the derived description and total.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (quote, record, list, stats)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐     ┌────────────────┐
//! │   Service   │────▶│ CostCalculator │  ← pricing domain
//! └──────┬──────┘     └────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← append-only persistence (trait + MongoDB impl)
//! └─────────────┘
//! ```
//!
//! Records never change after insertion except for the status transition
//! from `pending` to `completed` or `failed`.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{PaymentError, PaymentResult};
pub use handlers::ApiDoc;
pub use models::{
    BucketTotals, CreatePayment, PaymentFilter, PaymentMethod, PaymentRecord, PaymentStats,
    PaymentStatus,
};
pub use mongodb::MongoPaymentRepository;
pub use repository::PaymentRepository;
pub use service::PaymentService;
