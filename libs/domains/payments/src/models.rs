use chrono::{DateTime, Utc};
use domain_pricing::{CostBreakdown, Money, ServiceKind, UsageRequest};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Identifier prefix for payment records
pub const PAYMENT_ID_PREFIX: &str = "pay";

/// Accepted payment methods
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Paypal,
}

/// Payment lifecycle status
///
/// No payment gateway is integrated; a recorded payment is a ledger entry,
/// so new records default to `completed`. `pending` exists for payments
/// taken before the money actually changes hands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    #[default]
    Completed,
    Failed,
}

/// Payment record entity - an append-only ledger entry stored in MongoDB
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentRecord {
    /// Unique identifier (stored as _id in MongoDB), e.g. `pay_V1StGXR8`
    #[serde(rename = "_id", alias = "payment_id")]
    pub payment_id: String,
    /// Member the payment was taken from
    pub payer_id: String,
    /// Which service the payment covers
    pub service_kind: ServiceKind,
    /// Human-readable summary derived from the usage request
    pub description: String,
    /// Amount charged; always equals `service_details.total`
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    /// When the service was used
    pub service_date: DateTime<Utc>,
    /// The full cost breakdown, retained for audit
    pub service_details: CostBreakdown,
    /// When the record was written
    pub recorded_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Build a fresh record with a newly generated identifier.
    pub fn new(
        payer_id: String,
        service_kind: ServiceKind,
        description: String,
        breakdown: CostBreakdown,
        payment_method: PaymentMethod,
        status: PaymentStatus,
        service_date: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            payment_id: short_id::generate(PAYMENT_ID_PREFIX),
            payer_id,
            service_kind,
            description,
            amount: breakdown.total,
            payment_method,
            status,
            service_date: service_date.unwrap_or(now),
            service_details: breakdown,
            recorded_at: now,
        }
    }

    /// Replace the identifier after a collision.
    pub fn regenerate_id(&mut self) {
        self.payment_id = short_id::generate(PAYMENT_ID_PREFIX);
    }
}

/// DTO for recording a payment
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePayment {
    /// Member paying for the service
    #[validate(length(min = 1, max = 100))]
    pub payer_id: String,
    pub payment_method: PaymentMethod,
    /// The usage being paid for; priced server-side
    pub usage: UsageRequest,
    /// When the service was used (defaults to now)
    pub service_date: Option<DateTime<Utc>>,
    /// Initial status (defaults to completed)
    pub status: Option<PaymentStatus>,
}

/// Query filters for listing payments
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct PaymentFilter {
    /// Filter by payer
    pub payer_id: Option<String>,
    /// Filter by service kind
    pub service_kind: Option<ServiceKind>,
    /// Filter by status
    pub status: Option<PaymentStatus>,
    /// Filter by payment method
    pub payment_method: Option<PaymentMethod>,
    /// Records recorded at or after this time
    pub from: Option<DateTime<Utc>>,
    /// Records recorded at or before this time
    pub to: Option<DateTime<Utc>>,
    /// Maximum number of results
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of results to skip
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> i64 {
    50
}

/// Count and amount for one stats bucket
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BucketTotals {
    pub count: u64,
    pub amount: Money,
}

/// Aggregated payment totals for the admin reports
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentStats {
    /// Total number of payment records
    pub total_count: u64,
    /// Sum of all recorded amounts
    pub total_amount: Money,
    /// Totals grouped by service kind
    pub by_service: HashMap<String, BucketTotals>,
    /// Totals grouped by payment method
    pub by_method: HashMap<String, BucketTotals>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_pricing::{FilamentType, LineItem};

    fn breakdown() -> CostBreakdown {
        CostBreakdown::from_lines(vec![
            LineItem::new("filament cost", Money::new(180_00)),
            LineItem::new("power cost", Money::new(12_50)),
        ])
    }

    #[test]
    fn test_new_record_has_prefixed_id_and_matching_amount() {
        let record = PaymentRecord::new(
            "member-42".to_string(),
            ServiceKind::Printer3d,
            "3D printing: 150g PLA, 2.5h".to_string(),
            breakdown(),
            PaymentMethod::Cash,
            PaymentStatus::default(),
            None,
        );

        assert!(short_id::is_valid(PAYMENT_ID_PREFIX, &record.payment_id));
        assert_eq!(record.amount, record.service_details.total);
        assert_eq!(record.status, PaymentStatus::Completed);
    }

    #[test]
    fn test_regenerate_id_produces_a_different_valid_id() {
        let mut record = PaymentRecord::new(
            "member-42".to_string(),
            ServiceKind::Printer3d,
            "desc".to_string(),
            breakdown(),
            PaymentMethod::Card,
            PaymentStatus::Completed,
            None,
        );
        let original = record.payment_id.clone();
        record.regenerate_id();

        assert_ne!(record.payment_id, original);
        assert!(short_id::is_valid(PAYMENT_ID_PREFIX, &record.payment_id));
    }

    #[test]
    fn test_create_payment_deserializes_nested_usage() {
        let input: CreatePayment = serde_json::from_str(
            r#"{
                "payer_id": "member-42",
                "payment_method": "bank_transfer",
                "usage": {
                    "service_kind": "printer3d",
                    "filament_weight_grams": 150.0,
                    "filament_type": "PLA",
                    "printing_hours": 2.5
                }
            }"#,
        )
        .unwrap();

        assert_eq!(input.payment_method, PaymentMethod::BankTransfer);
        assert!(matches!(
            input.usage,
            UsageRequest::Printer3d {
                filament_type: FilamentType::Pla,
                ..
            }
        ));
        assert!(input.status.is_none());
    }
}
