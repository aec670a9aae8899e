//! Donation Service - Business logic layer

use std::sync::Arc;

use tracing::instrument;

use crate::error::{DonationError, DonationResult};
use crate::models::{CreateDonation, DonationFilter, DonationRecord, DonationStats};
use crate::repository::DonationRepository;

/// Donation service: validates contributions and records the resulting
/// ledger entries.
///
/// Validation happens entirely before the single durable write; the only
/// retry is the identifier-collision retry, mirroring the payment ledger.
pub struct DonationService<R: DonationRepository> {
    repository: Arc<R>,
}

impl<R: DonationRepository> DonationService<R> {
    /// Create a new DonationService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Record a donation: validate the type-conditional payload, persist.
    #[instrument(skip(self, input), fields(donation_type = %input.donation_type))]
    pub async fn record_donation(&self, input: CreateDonation) -> DonationResult<DonationRecord> {
        let received_at = input.received_at;
        let validated = input.validated()?;

        let mut record = DonationRecord::from_validated(validated, received_at);

        match self.repository.insert(&record).await {
            Err(DonationError::DuplicateId(id)) => {
                tracing::warn!(donation_id = %id, "Donation id collision, retrying with a fresh id");
                record.regenerate_id();
                self.repository.insert(&record).await?;
            }
            other => other?,
        }

        Ok(record)
    }

    /// Get a donation by ID
    #[instrument(skip(self))]
    pub async fn get_donation(&self, donation_id: &str) -> DonationResult<DonationRecord> {
        self.repository
            .get_by_id(donation_id)
            .await?
            .ok_or_else(|| DonationError::NotFound(donation_id.to_string()))
    }

    /// List donations with optional filters
    #[instrument(skip(self))]
    pub async fn list_donations(
        &self,
        filter: DonationFilter,
    ) -> DonationResult<Vec<DonationRecord>> {
        self.repository.list(filter).await
    }

    /// Count donations matching a filter
    #[instrument(skip(self))]
    pub async fn count_donations(&self, filter: DonationFilter) -> DonationResult<u64> {
        self.repository.count(filter).await
    }

    /// Aggregated totals for the admin reports
    #[instrument(skip(self))]
    pub async fn stats(&self) -> DonationResult<DonationStats> {
        self.repository.stats().await
    }
}

impl<R: DonationRepository> Clone for DonationService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
