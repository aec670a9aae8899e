use async_trait::async_trait;

use crate::error::DonationResult;
use crate::models::{DonationFilter, DonationRecord, DonationStats};

/// Repository trait for the append-only donation ledger
///
/// Donations are immutable once written; there is no update path at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Insert a new donation record.
    ///
    /// Fails with [`crate::DonationError::DuplicateId`] when the identifier
    /// already exists, so the caller can retry with a fresh one.
    async fn insert(&self, record: &DonationRecord) -> DonationResult<()>;

    /// Get a donation by its prefixed identifier
    async fn get_by_id(&self, donation_id: &str) -> DonationResult<Option<DonationRecord>>;

    /// List donations with optional filters, newest first
    async fn list(&self, filter: DonationFilter) -> DonationResult<Vec<DonationRecord>>;

    /// Count donations matching a filter
    async fn count(&self, filter: DonationFilter) -> DonationResult<u64>;

    /// Aggregate donation totals
    async fn stats(&self) -> DonationResult<DonationStats>;
}
