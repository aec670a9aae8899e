use async_trait::async_trait;

use crate::error::PaymentResult;
use crate::models::{PaymentFilter, PaymentRecord, PaymentStats, PaymentStatus};

/// Repository trait for the append-only payment ledger
///
/// There is deliberately no update or delete beyond the status transition:
/// payment records are immutable once written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a new payment record.
    ///
    /// Fails with [`crate::PaymentError::DuplicateId`] when the identifier
    /// already exists, so the caller can retry with a fresh one.
    async fn insert(&self, record: &PaymentRecord) -> PaymentResult<()>;

    /// Get a payment by its prefixed identifier
    async fn get_by_id(&self, payment_id: &str) -> PaymentResult<Option<PaymentRecord>>;

    /// List payments with optional filters, newest first
    async fn list(&self, filter: PaymentFilter) -> PaymentResult<Vec<PaymentRecord>>;

    /// Count payments matching a filter
    async fn count(&self, filter: PaymentFilter) -> PaymentResult<u64>;

    /// Set the status of a payment and return the updated record
    async fn set_status(
        &self,
        payment_id: &str,
        status: PaymentStatus,
    ) -> PaymentResult<PaymentRecord>;

    /// Aggregate totals per service kind and payment method
    async fn stats(&self) -> PaymentResult<PaymentStats>;
}
