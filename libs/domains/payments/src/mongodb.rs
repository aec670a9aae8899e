//! MongoDB implementation of PaymentRepository

use async_trait::async_trait;
use database::mongodb::is_duplicate_key_error;
use domain_pricing::Money;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, Document, doc, to_bson},
};
use std::collections::HashMap;
use tracing::instrument;

use crate::error::{PaymentError, PaymentResult};
use crate::models::{BucketTotals, PaymentFilter, PaymentRecord, PaymentStats, PaymentStatus};
use crate::repository::PaymentRepository;

/// MongoDB implementation of the PaymentRepository
#[derive(Clone)]
pub struct MongoPaymentRepository {
    collection: Collection<PaymentRecord>,
}

impl MongoPaymentRepository {
    /// Create a new MongoPaymentRepository on the `payments` collection
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<PaymentRecord>("payments");
        Self { collection }
    }

    /// Create indexes for efficient querying
    pub async fn create_indexes(&self) -> PaymentResult<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "payer_id": 1 }).build(),
            IndexModel::builder().keys(doc! { "recorded_at": -1 }).build(),
            IndexModel::builder().keys(doc! { "service_kind": 1 }).build(),
        ];

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(|e| PaymentError::Database(e.to_string()))?;
        Ok(())
    }

    /// Build a MongoDB filter document from PaymentFilter
    fn build_filter(filter: &PaymentFilter) -> Document {
        let mut doc = doc! {};

        if let Some(ref payer_id) = filter.payer_id {
            doc.insert("payer_id", payer_id);
        }

        if let Some(ref service_kind) = filter.service_kind {
            doc.insert("service_kind", service_kind.to_string());
        }

        if let Some(ref status) = filter.status {
            doc.insert("status", status.to_string());
        }

        if let Some(ref payment_method) = filter.payment_method {
            doc.insert("payment_method", payment_method.to_string());
        }

        // Timestamps are stored the way serde writes them, so the range
        // bounds must be serialized the same way for comparison
        let mut recorded_range = Document::new();
        if let Some(from) = filter.from {
            recorded_range.insert("$gte", to_bson(&from).unwrap_or(Bson::Null));
        }
        if let Some(to) = filter.to {
            recorded_range.insert("$lte", to_bson(&to).unwrap_or(Bson::Null));
        }
        if !recorded_range.is_empty() {
            doc.insert("recorded_at", recorded_range);
        }

        doc
    }

    /// Run one `$group` aggregation and collect its buckets.
    async fn grouped_totals(&self, group_field: &str) -> PaymentResult<HashMap<String, BucketTotals>> {
        let pipeline = vec![doc! {
            "$group": {
                "_id": format!("${}", group_field),
                "count": { "$sum": 1 },
                "amount": { "$sum": "$amount.amount" },
            }
        }];

        let cursor = self
            .collection
            .aggregate(pipeline)
            .await
            .map_err(|e| PaymentError::Database(e.to_string()))?;
        let buckets: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| PaymentError::Database(e.to_string()))?;

        let mut totals = HashMap::new();
        for bucket in buckets {
            let key = bucket.get_str("_id").unwrap_or_default().to_string();
            let count = numeric_field(&bucket, "count");
            let amount = numeric_field(&bucket, "amount");
            totals.insert(
                key,
                BucketTotals {
                    count: count.max(0) as u64,
                    amount: Money::new(amount),
                },
            );
        }
        Ok(totals)
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

#[async_trait]
impl PaymentRepository for MongoPaymentRepository {
    #[instrument(skip(self, record), fields(payment_id = %record.payment_id))]
    async fn insert(&self, record: &PaymentRecord) -> PaymentResult<()> {
        self.collection.insert_one(record).await.map_err(|e| {
            if is_duplicate_key_error(&e) {
                PaymentError::DuplicateId(record.payment_id.clone())
            } else {
                PaymentError::Database(e.to_string())
            }
        })?;

        tracing::info!(
            payment_id = %record.payment_id,
            amount = %record.amount,
            "Payment recorded successfully"
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, payment_id: &str) -> PaymentResult<Option<PaymentRecord>> {
        let record = self
            .collection
            .find_one(doc! { "_id": payment_id })
            .await
            .map_err(|e| PaymentError::Database(e.to_string()))?;
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: PaymentFilter) -> PaymentResult<Vec<PaymentRecord>> {
        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.limit)
            .skip(filter.offset)
            .sort(doc! { "recorded_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await
            .map_err(|e| PaymentError::Database(e.to_string()))?;
        let records: Vec<PaymentRecord> = cursor
            .try_collect()
            .await
            .map_err(|e| PaymentError::Database(e.to_string()))?;

        Ok(records)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: PaymentFilter) -> PaymentResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self
            .collection
            .count_documents(mongo_filter)
            .await
            .map_err(|e| PaymentError::Database(e.to_string()))?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn set_status(
        &self,
        payment_id: &str,
        status: PaymentStatus,
    ) -> PaymentResult<PaymentRecord> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": payment_id },
                doc! { "$set": { "status": status.to_string() } },
            )
            .await
            .map_err(|e| PaymentError::Database(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(PaymentError::NotFound(payment_id.to_string()));
        }

        tracing::info!(payment_id = %payment_id, status = %status, "Payment status updated");

        self.get_by_id(payment_id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> PaymentResult<PaymentStats> {
        let by_service = self.grouped_totals("service_kind").await?;
        let by_method = self.grouped_totals("payment_method").await?;

        let total_count = by_service.values().map(|b| b.count).sum();
        let total_amount = Money::new(by_service.values().map(|b| b.amount.amount).sum());

        Ok(PaymentStats {
            total_count,
            total_amount,
            by_service,
            by_method,
        })
    }
}
