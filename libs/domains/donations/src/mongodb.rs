//! MongoDB implementation of DonationRepository

use async_trait::async_trait;
use database::mongodb::is_duplicate_key_error;
use domain_pricing::Money;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_bson},
};
use tracing::instrument;

use crate::error::{DonationError, DonationResult};
use crate::models::{DonationFilter, DonationRecord, DonationStats, DonationType};
use crate::repository::DonationRepository;

/// MongoDB implementation of the DonationRepository
#[derive(Clone)]
pub struct MongoDonationRepository {
    collection: Collection<DonationRecord>,
}

impl MongoDonationRepository {
    /// Create a new MongoDonationRepository on the `donations` collection
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<DonationRecord>("donations");
        Self { collection }
    }

    /// Create indexes for efficient querying
    pub async fn create_indexes(&self) -> DonationResult<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "donation_type": 1 }).build(),
            IndexModel::builder().keys(doc! { "received_at": -1 }).build(),
        ];

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(|e| DonationError::Database(e.to_string()))?;
        Ok(())
    }

    /// Build a MongoDB filter document from DonationFilter
    fn build_filter(filter: &DonationFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref donation_type) = filter.donation_type {
            doc.insert("donation_type", donation_type.to_string());
        }

        if let Some(ref donor) = filter.donor {
            doc.insert("donor_name", doc! { "$regex": donor, "$options": "i" });
        }

        let mut received_range = Document::new();
        if let Some(from) = filter.from {
            received_range.insert("$gte", to_bson(&from).unwrap_or(Bson::Null));
        }
        if let Some(to) = filter.to {
            received_range.insert("$lte", to_bson(&to).unwrap_or(Bson::Null));
        }
        if !received_range.is_empty() {
            doc.insert("received_at", received_range);
        }

        doc
    }
}

#[async_trait]
impl DonationRepository for MongoDonationRepository {
    #[instrument(skip(self, record), fields(donation_id = %record.donation_id))]
    async fn insert(&self, record: &DonationRecord) -> DonationResult<()> {
        self.collection.insert_one(record).await.map_err(|e| {
            if is_duplicate_key_error(&e) {
                DonationError::DuplicateId(record.donation_id.clone())
            } else {
                DonationError::Database(e.to_string())
            }
        })?;

        tracing::info!(
            donation_id = %record.donation_id,
            donation_type = %record.donation_type,
            "Donation recorded successfully"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, donation_id: &str) -> DonationResult<Option<DonationRecord>> {
        let record = self
            .collection
            .find_one(doc! { "_id": donation_id })
            .await
            .map_err(|e| DonationError::Database(e.to_string()))?;
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: DonationFilter) -> DonationResult<Vec<DonationRecord>> {
        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "received_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await
            .map_err(|e| DonationError::Database(e.to_string()))?;
        let records: Vec<DonationRecord> = cursor
            .try_collect()
            .await
            .map_err(|e| DonationError::Database(e.to_string()))?;

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: DonationFilter) -> DonationResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self
            .collection
            .count_documents(mongo_filter)
            .await
            .map_err(|e| DonationError::Database(e.to_string()))?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> DonationResult<DonationStats> {
        let pipeline = vec![doc! {
            "$group": {
                "_id": "$donation_type",
                "count": { "$sum": 1 },
                // $sum skips the item donations, whose amount is absent
                "amount": { "$sum": "$amount.amount" },
            }
        }];

        let cursor = self
            .collection
            .aggregate(pipeline)
            .await
            .map_err(|e| DonationError::Database(e.to_string()))?;
        let buckets: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| DonationError::Database(e.to_string()))?;

        let mut stats = DonationStats {
            total_count: 0,
            monetary_count: 0,
            item_count: 0,
            monetary_total: Money::zero(),
        };

        for bucket in buckets {
            let count = numeric_field(&bucket, "count").max(0) as u64;
            stats.total_count += count;
            match bucket.get_str("_id") {
                Ok(t) if t == DonationType::Monetary.to_string() => {
                    stats.monetary_count = count;
                    stats.monetary_total = Money::new(numeric_field(&bucket, "amount"));
                }
                Ok(t) if t == DonationType::Item.to_string() => {
                    stats.item_count = count;
                }
                _ => {}
            }
        }

        Ok(stats)
    }
}

/// Aggregation sums come back as i32 or i64 depending on magnitude.
fn numeric_field(doc: &Document, key: &str) -> i64 {
    match doc.get(key) {
        Some(Bson::Int32(v)) => i64::from(*v),
        Some(Bson::Int64(v)) => *v,
        Some(Bson::Double(v)) => *v as i64,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let doc = MongoDonationRepository::build_filter(&DonationFilter::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_type() {
        let filter = DonationFilter {
            donation_type: Some(DonationType::Monetary),
            ..Default::default()
        };
        let doc = MongoDonationRepository::build_filter(&filter);
        assert_eq!(doc.get_str("donation_type").unwrap(), "monetary");
    }

    #[test]
    fn test_build_filter_donor_search_is_case_insensitive_regex() {
        let filter = DonationFilter {
            donor: Some("ada".to_string()),
            ..Default::default()
        };
        let doc = MongoDonationRepository::build_filter(&filter);
        let donor = doc.get_document("donor_name").unwrap();
        assert_eq!(donor.get_str("$regex").unwrap(), "ada");
        assert_eq!(donor.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_build_filter_time_range() {
        let filter = DonationFilter {
            to: Some(chrono::Utc::now()),
            ..Default::default()
        };
        let doc = MongoDonationRepository::build_filter(&filter);
        assert!(doc.get_document("received_at").unwrap().contains_key("$lte"));
    }
}
