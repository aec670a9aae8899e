use chrono::{DateTime, Utc};
use domain_pricing::Money;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::{DonationError, DonationResult};

/// Identifier prefix for donation records
pub const DONATION_ID_PREFIX: &str = "don";

/// Kind of contribution
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DonationType {
    Monetary,
    Item,
}

/// Condition of a donated item
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemCondition {
    New,
    Excellent,
    Good,
    Fair,
}

/// Donation record entity - an append-only ledger entry stored in MongoDB
///
/// Exactly one of the monetary/item field clusters is populated, matching
/// `donation_type`; [`CreateDonation::validated`] enforces this before any
/// record is built.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DonationRecord {
    /// Unique identifier (stored as _id in MongoDB), e.g. `don_V1StGXR8`
    #[serde(rename = "_id", alias = "donation_id")]
    pub donation_id: String,
    /// Donor name; absent for anonymous donations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_name: Option<String>,
    pub donation_type: DonationType,
    /// Donated amount (monetary donations only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    /// What was donated (item donations only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_description: Option<String>,
    /// Estimated value of the donated item, when the donor provided one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_value: Option<Money>,
    /// Condition of the donated item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ItemCondition>,
    /// When the donation was received
    pub received_at: DateTime<Utc>,
    /// When the record was written
    pub recorded_at: DateTime<Utc>,
}

impl DonationRecord {
    /// Build a record from a validated donation with a fresh identifier.
    pub fn from_validated(donation: ValidatedDonation, received_at: Option<DateTime<Utc>>) -> Self {
        let now = Utc::now();
        let base = Self {
            donation_id: short_id::generate(DONATION_ID_PREFIX),
            donor_name: None,
            donation_type: DonationType::Monetary,
            amount: None,
            item_description: None,
            estimated_value: None,
            condition: None,
            received_at: received_at.unwrap_or(now),
            recorded_at: now,
        };

        match donation {
            ValidatedDonation::Monetary { donor_name, amount } => Self {
                donor_name,
                donation_type: DonationType::Monetary,
                amount: Some(amount),
                ..base
            },
            ValidatedDonation::Item {
                donor_name,
                description,
                estimated_value,
                condition,
            } => Self {
                donor_name,
                donation_type: DonationType::Item,
                item_description: Some(description),
                estimated_value,
                condition,
                ..base
            },
        }
    }

    /// Replace the identifier after a collision.
    pub fn regenerate_id(&mut self) {
        self.donation_id = short_id::generate(DONATION_ID_PREFIX);
    }
}

/// Raw donation payload as submitted by a client.
///
/// The `type` discriminant arrives as a free string so an unrecognized
/// value produces an explicit invalid-type error rather than a generic
/// deserialization failure.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDonation {
    /// Donor name; blank or missing means anonymous
    pub donor_name: Option<String>,
    /// "monetary" or "item"
    #[serde(rename = "type")]
    pub donation_type: String,
    /// Donated amount in pesos (monetary donations)
    pub amount: Option<f64>,
    /// What was donated (item donations)
    pub item_description: Option<String>,
    /// Estimated value in pesos (item donations, optional)
    pub estimated_value: Option<f64>,
    /// Condition of the donated item (item donations, optional)
    pub condition: Option<ItemCondition>,
    /// When the donation was received (defaults to now)
    pub received_at: Option<DateTime<Utc>>,
}

/// A donation that passed type-conditional validation.
///
/// Each variant carries exactly the fields legal for its type, so nothing
/// downstream needs to re-check the monetary/item field clusters.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedDonation {
    Monetary {
        donor_name: Option<String>,
        amount: Money,
    },
    Item {
        donor_name: Option<String>,
        description: String,
        estimated_value: Option<Money>,
        condition: Option<ItemCondition>,
    },
}

impl CreateDonation {
    /// Run the type-conditional validation.
    ///
    /// Monetary donations require a positive amount and no item fields;
    /// item donations require a non-empty description and no amount.
    /// Payloads mixing both clusters are ambiguous and rejected outright
    /// rather than silently picking one side.
    pub fn validated(self) -> DonationResult<ValidatedDonation> {
        let donation_type = DonationType::from_str(self.donation_type.trim())
            .map_err(|_| DonationError::InvalidType(self.donation_type.clone()))?;

        let donor_name = self
            .donor_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());

        let has_item_description = self
            .item_description
            .as_ref()
            .is_some_and(|d| !d.trim().is_empty());

        match donation_type {
            DonationType::Monetary => {
                if has_item_description {
                    return Err(DonationError::invalid(
                        "item_description",
                        "must not be set for monetary donations",
                    ));
                }
                if self.estimated_value.is_some() {
                    return Err(DonationError::invalid(
                        "estimated_value",
                        "must not be set for monetary donations",
                    ));
                }
                if self.condition.is_some() {
                    return Err(DonationError::invalid(
                        "condition",
                        "must not be set for monetary donations",
                    ));
                }

                let amount = self.amount.ok_or_else(|| {
                    DonationError::invalid("amount", "required for monetary donations")
                })?;
                if !(amount.is_finite() && amount > 0.0) {
                    return Err(DonationError::invalid("amount", "must be a positive number"));
                }

                Ok(ValidatedDonation::Monetary {
                    donor_name,
                    amount: Money::from_decimal(amount),
                })
            }
            DonationType::Item => {
                if self.amount.is_some() {
                    return Err(DonationError::invalid(
                        "amount",
                        "must not be set for item donations",
                    ));
                }

                let description = self
                    .item_description
                    .map(|d| d.trim().to_string())
                    .filter(|d| !d.is_empty())
                    .ok_or_else(|| {
                        DonationError::invalid("item_description", "required for item donations")
                    })?;

                let estimated_value = match self.estimated_value {
                    None => None,
                    Some(value) if value.is_finite() && value >= 0.0 => {
                        Some(Money::from_decimal(value))
                    }
                    Some(_) => {
                        return Err(DonationError::invalid(
                            "estimated_value",
                            "must be a non-negative number",
                        ));
                    }
                };

                Ok(ValidatedDonation::Item {
                    donor_name,
                    description,
                    estimated_value,
                    condition: self.condition,
                })
            }
        }
    }
}

/// Query filters for listing donations
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct DonationFilter {
    /// Filter by donation type
    pub donation_type: Option<DonationType>,
    /// Search in donor names
    pub donor: Option<String>,
    /// Records received at or after this time
    pub from: Option<DateTime<Utc>>,
    /// Records received at or before this time
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

/// Aggregated donation totals for the admin reports
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DonationStats {
    /// Total number of donation records
    pub total_count: u64,
    /// Number of monetary donations
    pub monetary_count: u64,
    /// Number of item donations
    pub item_count: u64,
    /// Sum of all monetary donation amounts
    pub monetary_total: Money,
}
