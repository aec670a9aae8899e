//! Payment Service - Business logic layer

use std::sync::Arc;

use domain_pricing::{CatalogLookup, CostBreakdown, CostCalculator, UsageRequest};
use tracing::instrument;
use validator::Validate;

use crate::error::{PaymentError, PaymentResult};
use crate::models::{
    CreatePayment, PaymentFilter, PaymentRecord, PaymentStats, PaymentStatus,
};
use crate::repository::PaymentRepository;

/// Payment service: prices usage requests and records the resulting ledger
/// entries.
///
/// All validation and calculation happen before the single durable write, so
/// a rejected request never leaves a partial record behind. The only retry
/// is the identifier-collision retry: one fresh id, one re-insert.
pub struct PaymentService<R: PaymentRepository, C: CatalogLookup> {
    repository: Arc<R>,
    calculator: CostCalculator<C>,
}

impl<R: PaymentRepository, C: CatalogLookup> PaymentService<R, C> {
    /// Create a new PaymentService
    pub fn new(repository: R, calculator: CostCalculator<C>) -> Self {
        Self {
            repository: Arc::new(repository),
            calculator,
        }
    }

    /// Price a usage request without recording anything.
    ///
    /// Backs the preview clients show before the member confirms payment.
    #[instrument(skip(self, usage), fields(service_kind = %usage.kind()))]
    pub async fn quote(&self, usage: &UsageRequest) -> PaymentResult<CostBreakdown> {
        Ok(self.calculator.calculate(usage).await?)
    }

    /// Record a payment: validate, price, persist.
    #[instrument(skip(self, input), fields(payer_id = %input.payer_id))]
    pub async fn record_payment(&self, input: CreatePayment) -> PaymentResult<PaymentRecord> {
        input
            .validate()
            .map_err(|e| PaymentError::Validation(e.to_string()))?;

        let breakdown = self.calculator.calculate(&input.usage).await?;
        let description = derive_description(&input.usage, &breakdown);

        let mut record = PaymentRecord::new(
            input.payer_id,
            input.usage.kind(),
            description,
            breakdown,
            input.payment_method,
            input.status.unwrap_or_default(),
            input.service_date,
        );

        // A 48-bit id colliding is vanishingly rare; one retry with a fresh
        // id covers it, anything beyond that surfaces as a conflict
        match self.repository.insert(&record).await {
            Err(PaymentError::DuplicateId(id)) => {
                tracing::warn!(payment_id = %id, "Payment id collision, retrying with a fresh id");
                record.regenerate_id();
                self.repository.insert(&record).await?;
            }
            other => other?,
        }

        Ok(record)
    }

    /// Get a payment by ID
    #[instrument(skip(self))]
    pub async fn get_payment(&self, payment_id: &str) -> PaymentResult<PaymentRecord> {
        self.repository
            .get_by_id(payment_id)
            .await?
            .ok_or_else(|| PaymentError::NotFound(payment_id.to_string()))
    }

    /// List payments with optional filters
    #[instrument(skip(self))]
    pub async fn list_payments(&self, filter: PaymentFilter) -> PaymentResult<Vec<PaymentRecord>> {
        self.repository.list(filter).await
    }

    /// Count payments matching a filter
    #[instrument(skip(self))]
    pub async fn count_payments(&self, filter: PaymentFilter) -> PaymentResult<u64> {
        self.repository.count(filter).await
    }

    /// Aggregated totals for the admin reports
    #[instrument(skip(self))]
    pub async fn stats(&self) -> PaymentResult<PaymentStats> {
        self.repository.stats().await
    }

    /// Mark a pending payment as completed
    #[instrument(skip(self))]
    pub async fn complete_payment(&self, payment_id: &str) -> PaymentResult<PaymentRecord> {
        self.transition(payment_id, PaymentStatus::Completed).await
    }

    /// Mark a pending payment as failed
    #[instrument(skip(self))]
    pub async fn fail_payment(&self, payment_id: &str) -> PaymentResult<PaymentRecord> {
        self.transition(payment_id, PaymentStatus::Failed).await
    }

    /// Status may only move away from `pending`; everything else on a
    /// record is immutable.
    async fn transition(
        &self,
        payment_id: &str,
        to: PaymentStatus,
    ) -> PaymentResult<PaymentRecord> {
        let existing = self.get_payment(payment_id).await?;

        if existing.status != PaymentStatus::Pending {
            return Err(PaymentError::InvalidStatusTransition {
                payment_id: payment_id.to_string(),
                from: existing.status,
            });
        }

        self.repository.set_status(payment_id, to).await
    }
}

impl<R: PaymentRepository, C: CatalogLookup> Clone for PaymentService<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            calculator: self.calculator.clone(),
        }
    }
}

/// Derive the human-readable record summary from the priced request.
fn derive_description(usage: &UsageRequest, breakdown: &CostBreakdown) -> String {
    match usage {
        UsageRequest::Printer3d {
            filament_weight_grams,
            filament_type,
            printing_hours,
        } => format!(
            "3D printing: {}g {}, {}h",
            filament_weight_grams, filament_type, printing_hours
        ),
        UsageRequest::Soldering { hours_used } => {
            format!("Soldering station: {}h", hours_used)
        }
        UsageRequest::DocumentPrinter { jobs, binding } => {
            let pages: u64 = jobs
                .iter()
                .map(|j| u64::from(j.pages) * u64::from(j.copies))
                .sum();
            let mut description =
                format!("Document printing: {} pages across {} jobs", pages, jobs.len());
            if *binding {
                description.push_str(", with binding");
            }
            description
        }
        UsageRequest::ToolsOrComponents { .. } => {
            // The breakdown lines already carry "name xN" labels
            let items: Vec<&str> = breakdown
                .line_items
                .iter()
                .map(|l| l.label.as_str())
                .collect();
            format!("Tools/components: {}", items.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PAYMENT_ID_PREFIX, PaymentMethod};
    use crate::repository::MockPaymentRepository;
    use async_trait::async_trait;
    use domain_pricing::{
        CatalogPriceRef, FilamentType, Money, PricingError, PricingResult, RateTable, ServiceKind,
    };
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fixed in-memory catalog for exercising the tools path.
    struct StaticCatalog;

    #[async_trait]
    impl CatalogLookup for StaticCatalog {
        async fn get_item(&self, item_id: &str) -> PricingResult<Option<CatalogPriceRef>> {
            if item_id == "tool_scrwdrvr" {
                Ok(Some(CatalogPriceRef {
                    item_id: item_id.to_string(),
                    name: "Screwdriver".to_string(),
                    unit_price: Money::new(850_00),
                    stock_quantity: 4,
                }))
            } else {
                Ok(None)
            }
        }
    }

    fn service(
        repository: MockPaymentRepository,
    ) -> PaymentService<MockPaymentRepository, StaticCatalog> {
        PaymentService::new(
            repository,
            CostCalculator::new(RateTable::standard(), Arc::new(StaticCatalog)),
        )
    }

    fn printer_input() -> CreatePayment {
        CreatePayment {
            payer_id: "member-42".to_string(),
            payment_method: PaymentMethod::Cash,
            usage: UsageRequest::Printer3d {
                filament_weight_grams: 150.0,
                filament_type: FilamentType::Pla,
                printing_hours: 2.5,
            },
            service_date: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_record_payment_happy_path() {
        let mut repo = MockPaymentRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(()));

        let record = service(repo).record_payment(printer_input()).await.unwrap();

        assert!(short_id::is_valid(PAYMENT_ID_PREFIX, &record.payment_id));
        assert_eq!(record.amount, Money::new(192_50));
        assert_eq!(record.amount, record.service_details.total);
        assert_eq!(record.status, PaymentStatus::Completed);
        assert_eq!(record.service_kind, ServiceKind::Printer3d);
        assert_eq!(record.description, "3D printing: 150g PLA, 2.5h");
    }

    #[tokio::test]
    async fn test_record_payment_retries_once_on_id_collision() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_in_mock = Arc::clone(&attempts);

        let mut repo = MockPaymentRepository::new();
        repo.expect_insert().times(2).returning(move |record| {
            if attempts_in_mock.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(PaymentError::DuplicateId(record.payment_id.clone()))
            } else {
                Ok(())
            }
        });

        let record = service(repo).record_payment(printer_input()).await.unwrap();
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
        assert!(short_id::is_valid(PAYMENT_ID_PREFIX, &record.payment_id));
    }

    #[tokio::test]
    async fn test_record_payment_surfaces_conflict_after_retry_exhaustion() {
        let mut repo = MockPaymentRepository::new();
        repo.expect_insert()
            .times(2)
            .returning(|record| Err(PaymentError::DuplicateId(record.payment_id.clone())));

        let err = service(repo).record_payment(printer_input()).await.unwrap_err();
        assert!(matches!(err, PaymentError::DuplicateId(_)));
    }

    #[tokio::test]
    async fn test_record_payment_rejects_empty_payer_without_persisting() {
        // No insert expectation: any repository call would panic the test
        let repo = MockPaymentRepository::new();

        let mut input = printer_input();
        input.payer_id = String::new();
        let err = service(repo).record_payment(input).await.unwrap_err();
        assert!(matches!(err, PaymentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_record_payment_rejects_invalid_usage_without_persisting() {
        let repo = MockPaymentRepository::new();

        let mut input = printer_input();
        input.usage = UsageRequest::Printer3d {
            filament_weight_grams: 0.0,
            filament_type: FilamentType::Pla,
            printing_hours: 2.5,
        };
        let err = service(repo).record_payment(input).await.unwrap_err();
        assert!(matches!(
            err,
            PaymentError::Pricing(PricingError::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_record_payment_for_tools_resolves_catalog() {
        let mut repo = MockPaymentRepository::new();
        repo.expect_insert().times(1).returning(|_| Ok(()));

        let input = CreatePayment {
            payer_id: "member-42".to_string(),
            payment_method: PaymentMethod::Card,
            usage: UsageRequest::ToolsOrComponents {
                selections: vec![domain_pricing::CatalogSelection {
                    catalog_item_id: "tool_scrwdrvr".to_string(),
                    quantity: 1,
                }],
            },
            service_date: None,
            status: None,
        };

        let record = service(repo).record_payment(input).await.unwrap();
        assert_eq!(record.amount, Money::new(850_00));
        assert_eq!(record.description, "Tools/components: Screwdriver x1");
    }

    #[tokio::test]
    async fn test_quote_does_not_touch_the_repository() {
        let repo = MockPaymentRepository::new();

        let usage = UsageRequest::Soldering { hours_used: 1.5 };
        let breakdown = service(repo).quote(&usage).await.unwrap();
        assert_eq!(breakdown.total, Money::new(15_00));
    }

    #[tokio::test]
    async fn test_complete_payment_requires_pending_status() {
        let mut repo = MockPaymentRepository::new();
        repo.expect_get_by_id().returning(|id| {
            let mut record = PaymentRecord::new(
                "member-42".to_string(),
                ServiceKind::Soldering,
                "Soldering station: 1.5h".to_string(),
                CostBreakdown::from_lines(vec![]),
                PaymentMethod::Cash,
                PaymentStatus::Completed,
                None,
            );
            record.payment_id = id.to_string();
            Ok(Some(record))
        });

        let err = service(repo)
            .complete_payment("pay_V1StGXR8")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PaymentError::InvalidStatusTransition {
                from: PaymentStatus::Completed,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_fail_payment_transitions_pending_records() {
        let mut repo = MockPaymentRepository::new();
        repo.expect_get_by_id().returning(|id| {
            let mut record = PaymentRecord::new(
                "member-42".to_string(),
                ServiceKind::Soldering,
                "Soldering station: 1.5h".to_string(),
                CostBreakdown::from_lines(vec![]),
                PaymentMethod::Cash,
                PaymentStatus::Pending,
                None,
            );
            record.payment_id = id.to_string();
            Ok(Some(record))
        });
        repo.expect_set_status()
            .withf(|_, status| *status == PaymentStatus::Failed)
            .returning(|id, status| {
                let mut record = PaymentRecord::new(
                    "member-42".to_string(),
                    ServiceKind::Soldering,
                    "Soldering station: 1.5h".to_string(),
                    CostBreakdown::from_lines(vec![]),
                    PaymentMethod::Cash,
                    status,
                    None,
                );
                record.payment_id = id.to_string();
                Ok(record)
            });

        let record = service(repo).fail_payment("pay_V1StGXR8").await.unwrap();
        assert_eq!(record.status, PaymentStatus::Failed);
    }

    #[tokio::test]
    async fn test_get_payment_maps_missing_to_not_found() {
        let mut repo = MockPaymentRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let err = service(repo).get_payment("pay_missing1").await.unwrap_err();
        assert!(matches!(err, PaymentError::NotFound(_)));
    }

    #[test]
    fn test_derive_description_document_printer() {
        use domain_pricing::{ColorMode, DocumentPrintJob, PaperSize, PaperType};

        let usage = UsageRequest::DocumentPrinter {
            jobs: vec![
                DocumentPrintJob {
                    pages: 10,
                    copies: 2,
                    paper_size: PaperSize::A4,
                    color_mode: ColorMode::BlackWhite,
                    paper_type: PaperType::Standard,
                },
                DocumentPrintJob {
                    pages: 1,
                    copies: 1,
                    paper_size: PaperSize::A3,
                    color_mode: ColorMode::Color,
                    paper_type: PaperType::Premium,
                },
            ],
            binding: true,
        };
        let breakdown = CostBreakdown::from_lines(vec![]);

        assert_eq!(
            derive_description(&usage, &breakdown),
            "Document printing: 21 pages across 2 jobs, with binding"
        );
    }
}
