//! Cost calculators: one deterministic calculation per service kind.

use std::sync::Arc;

use tracing::instrument;

use crate::catalog::{CatalogLookup, CatalogPriceRef};
use crate::error::{PricingError, PricingResult};
use crate::models::{
    CatalogSelection, CostBreakdown, DocumentPrintJob, FilamentType, LineItem, Money, PaperType,
    UsageRequest,
};
use crate::rates::{HourlyService, RateTable};

/// A catalog selection with its price resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedSelection {
    pub item_id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
}

/// Dispatches a [`UsageRequest`] to the calculation for its service kind.
///
/// Every calculation is pure: validation first, then fixed-order arithmetic
/// over the rate table. The tools/components path additionally resolves unit
/// prices through the [`CatalogLookup`] seam before its (equally pure)
/// summation, which is why [`CostCalculator::calculate`] is async.
pub struct CostCalculator<C: CatalogLookup> {
    rates: RateTable,
    catalog: Arc<C>,
}

impl<C: CatalogLookup> CostCalculator<C> {
    pub fn new(rates: RateTable, catalog: Arc<C>) -> Self {
        Self { rates, catalog }
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Price a usage request.
    ///
    /// Fails with `InvalidInput` naming the offending field before any
    /// catalog I/O happens; a failed calculation therefore never leaves a
    /// trace anywhere.
    #[instrument(skip(self, request), fields(service_kind = %request.kind()))]
    pub async fn calculate(&self, request: &UsageRequest) -> PricingResult<CostBreakdown> {
        match request {
            UsageRequest::Printer3d {
                filament_weight_grams,
                filament_type,
                printing_hours,
            } => self.printer3d(*filament_weight_grams, *filament_type, *printing_hours),
            UsageRequest::Soldering { hours_used } => self.soldering(*hours_used),
            UsageRequest::DocumentPrinter { jobs, binding } => {
                self.document_printer(jobs, *binding)
            }
            UsageRequest::ToolsOrComponents { selections } => {
                let priced = self.resolve_selections(selections).await?;
                self.tools_or_components(&priced)
            }
        }
    }

    /// 3D printer: filament share of a spool plus power per hour.
    fn printer3d(
        &self,
        filament_weight_grams: f64,
        filament_type: FilamentType,
        printing_hours: f64,
    ) -> PricingResult<CostBreakdown> {
        ensure_positive("filament_weight_grams", filament_weight_grams)?;
        ensure_positive("printing_hours", printing_hours)?;

        let spool_price = self.rates.filament_price(filament_type)?;
        let filament_cost = Money::from_decimal(
            filament_weight_grams / self.rates.spool_weight_grams() * spool_price.to_decimal(),
        );

        let power_rate = self.rates.hourly_rate(HourlyService::Printer3dPower)?;
        let power_cost = Money::from_decimal(printing_hours * power_rate.to_decimal());

        Ok(CostBreakdown::from_lines(vec![
            LineItem::new("filament cost", filament_cost),
            LineItem::new("power cost", power_cost),
        ]))
    }

    /// Soldering station: hours times the hourly rate.
    fn soldering(&self, hours_used: f64) -> PricingResult<CostBreakdown> {
        ensure_positive("hours_used", hours_used)?;

        let rate = self.rates.hourly_rate(HourlyService::Soldering)?;
        let cost = Money::from_decimal(hours_used * rate.to_decimal());

        Ok(CostBreakdown::from_lines(vec![LineItem::new(
            "soldering cost",
            cost,
        )]))
    }

    /// Document printing: per-page rates summed over all jobs, a premium
    /// paper surcharge where selected, and one flat binding fee for the
    /// whole request.
    fn document_printer(
        &self,
        jobs: &[DocumentPrintJob],
        binding: bool,
    ) -> PricingResult<CostBreakdown> {
        if jobs.is_empty() {
            return Err(PricingError::invalid(
                "jobs",
                "at least one print job is required",
            ));
        }

        let mut printing = 0i64;
        let mut premium = 0i64;

        for (idx, job) in jobs.iter().enumerate() {
            if job.pages == 0 {
                return Err(PricingError::invalid(
                    format!("jobs[{}].pages", idx),
                    "must be at least 1",
                ));
            }
            if job.copies == 0 {
                return Err(PricingError::invalid(
                    format!("jobs[{}].copies", idx),
                    "must be at least 1",
                ));
            }

            let units = i64::from(job.pages) * i64::from(job.copies);
            let rate = self.rates.document_rate(job.paper_size, job.color_mode)?;
            printing += rate.amount * units;

            if job.paper_type == PaperType::Premium {
                premium += self.rates.premium_surcharge(job.paper_size)?.amount * units;
            }
        }

        let mut lines = vec![LineItem::new("printing cost", Money::new(printing))];
        if premium > 0 {
            lines.push(LineItem::new("premium paper surcharge", Money::new(premium)));
        }
        if binding {
            lines.push(LineItem::new("binding fee", self.rates.binding_fee()));
        }

        Ok(CostBreakdown::from_lines(lines))
    }

    /// Resolve positive-quantity selections against the catalog, preserving
    /// input order. Zero-quantity selections are dropped before any I/O.
    async fn resolve_selections(
        &self,
        selections: &[CatalogSelection],
    ) -> PricingResult<Vec<PricedSelection>> {
        let wanted: Vec<&CatalogSelection> =
            selections.iter().filter(|s| s.quantity > 0).collect();
        if wanted.is_empty() {
            return Err(PricingError::EmptySelection);
        }

        let mut priced = Vec::with_capacity(wanted.len());
        for selection in wanted {
            let CatalogPriceRef {
                item_id,
                name,
                unit_price,
                ..
            } = self
                .catalog
                .get_item(&selection.catalog_item_id)
                .await?
                .ok_or_else(|| PricingError::ItemNotFound(selection.catalog_item_id.clone()))?;

            priced.push(PricedSelection {
                item_id,
                name,
                unit_price,
                quantity: selection.quantity,
            });
        }
        Ok(priced)
    }

    /// Tools/components: one line per selection, unit price times quantity.
    fn tools_or_components(&self, selections: &[PricedSelection]) -> PricingResult<CostBreakdown> {
        if selections.is_empty() {
            return Err(PricingError::EmptySelection);
        }

        let lines = selections
            .iter()
            .map(|s| {
                LineItem::new(
                    format!("{} x{}", s.name, s.quantity),
                    Money::new(s.unit_price.amount * i64::from(s.quantity)),
                )
            })
            .collect();

        Ok(CostBreakdown::from_lines(lines))
    }
}

impl<C: CatalogLookup> Clone for CostCalculator<C> {
    fn clone(&self) -> Self {
        Self {
            rates: self.rates.clone(),
            catalog: Arc::clone(&self.catalog),
        }
    }
}

fn ensure_positive(field: &str, value: f64) -> PricingResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid(field, "must be a positive number"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockCatalogLookup;
    use crate::models::{ColorMode, PaperSize, ServiceKind};

    fn calculator() -> CostCalculator<MockCatalogLookup> {
        CostCalculator::new(RateTable::standard(), Arc::new(MockCatalogLookup::new()))
    }

    fn screwdriver() -> CatalogPriceRef {
        CatalogPriceRef {
            item_id: "tool_scrwdrvr".to_string(),
            name: "Screwdriver".to_string(),
            unit_price: Money::new(850_00),
            stock_quantity: 4,
        }
    }

    #[tokio::test]
    async fn test_printer3d_pla_scenario() {
        // 150g PLA at ₱1200/kg spool plus 2.5h power at ₱5/h
        let request = UsageRequest::Printer3d {
            filament_weight_grams: 150.0,
            filament_type: FilamentType::Pla,
            printing_hours: 2.5,
        };
        let breakdown = calculator().calculate(&request).await.unwrap();

        assert_eq!(breakdown.line_items.len(), 2);
        assert_eq!(breakdown.line_items[0].label, "filament cost");
        assert_eq!(breakdown.line_items[0].amount, Money::new(180_00));
        assert_eq!(breakdown.line_items[1].label, "power cost");
        assert_eq!(breakdown.line_items[1].amount, Money::new(12_50));
        assert_eq!(breakdown.total, Money::new(192_50));
    }

    #[tokio::test]
    async fn test_printer3d_abs_uses_abs_spool_price() {
        let request = UsageRequest::Printer3d {
            filament_weight_grams: 1000.0,
            filament_type: FilamentType::Abs,
            printing_hours: 1.0,
        };
        let breakdown = calculator().calculate(&request).await.unwrap();
        // A full spool of ABS plus one hour of power
        assert_eq!(breakdown.total, Money::new(1355_00));
    }

    #[tokio::test]
    async fn test_printer3d_rejects_zero_weight() {
        let request = UsageRequest::Printer3d {
            filament_weight_grams: 0.0,
            filament_type: FilamentType::Pla,
            printing_hours: 2.0,
        };
        let err = calculator().calculate(&request).await.unwrap_err();
        assert_eq!(
            err,
            PricingError::invalid("filament_weight_grams", "must be a positive number")
        );
    }

    #[tokio::test]
    async fn test_printer3d_rejects_negative_hours() {
        let request = UsageRequest::Printer3d {
            filament_weight_grams: 100.0,
            filament_type: FilamentType::Pla,
            printing_hours: -1.0,
        };
        let err = calculator().calculate(&request).await.unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidInput { ref field, .. } if field == "printing_hours"
        ));
    }

    #[tokio::test]
    async fn test_printer3d_rejects_nan_weight() {
        let request = UsageRequest::Printer3d {
            filament_weight_grams: f64::NAN,
            filament_type: FilamentType::Pla,
            printing_hours: 1.0,
        };
        assert!(calculator().calculate(&request).await.is_err());
    }

    #[tokio::test]
    async fn test_soldering_scenario() {
        // 1.5h at ₱10/h
        let request = UsageRequest::Soldering { hours_used: 1.5 };
        let breakdown = calculator().calculate(&request).await.unwrap();

        assert_eq!(breakdown.line_items.len(), 1);
        assert_eq!(breakdown.line_items[0].label, "soldering cost");
        assert_eq!(breakdown.total, Money::new(15_00));
    }

    #[tokio::test]
    async fn test_soldering_rejects_non_positive_hours() {
        for hours in [0.0, -1.0] {
            let request = UsageRequest::Soldering { hours_used: hours };
            let err = calculator().calculate(&request).await.unwrap_err();
            assert!(matches!(
                err,
                PricingError::InvalidInput { ref field, .. } if field == "hours_used"
            ));
        }
    }

    #[tokio::test]
    async fn test_document_printer_basic_job() {
        // 10 pages x 2 copies A4 bw at ₱2/page
        let request = UsageRequest::DocumentPrinter {
            jobs: vec![DocumentPrintJob {
                pages: 10,
                copies: 2,
                paper_size: PaperSize::A4,
                color_mode: ColorMode::BlackWhite,
                paper_type: PaperType::Standard,
            }],
            binding: false,
        };
        let breakdown = calculator().calculate(&request).await.unwrap();
        assert_eq!(breakdown.line_items.len(), 1);
        assert_eq!(breakdown.total, Money::new(40_00));
    }

    #[tokio::test]
    async fn test_document_printer_single_job_with_binding() {
        let request = UsageRequest::DocumentPrinter {
            jobs: vec![DocumentPrintJob {
                pages: 10,
                copies: 2,
                paper_size: PaperSize::A4,
                color_mode: ColorMode::BlackWhite,
                paper_type: PaperType::Standard,
            }],
            binding: true,
        };
        let breakdown = calculator().calculate(&request).await.unwrap();
        // ₱40 of printing plus the flat ₱50 binding fee
        assert_eq!(breakdown.total, Money::new(90_00));
    }

    #[tokio::test]
    async fn test_document_printer_binding_fee_is_flat_per_request() {
        let job = DocumentPrintJob {
            pages: 10,
            copies: 2,
            paper_size: PaperSize::A4,
            color_mode: ColorMode::BlackWhite,
            paper_type: PaperType::Standard,
        };
        let request = UsageRequest::DocumentPrinter {
            jobs: vec![job.clone(), job],
            binding: true,
        };
        let breakdown = calculator().calculate(&request).await.unwrap();

        // Two identical jobs but only one ₱50 binding fee
        assert_eq!(breakdown.line_items.last().unwrap().label, "binding fee");
        assert_eq!(breakdown.total, Money::new(130_00));
    }

    #[tokio::test]
    async fn test_document_printer_premium_surcharge_per_unit() {
        let request = UsageRequest::DocumentPrinter {
            jobs: vec![DocumentPrintJob {
                pages: 5,
                copies: 1,
                paper_size: PaperSize::A3,
                color_mode: ColorMode::Color,
                paper_type: PaperType::Premium,
            }],
            binding: false,
        };
        let breakdown = calculator().calculate(&request).await.unwrap();

        // 5 pages A3 color at ₱10 plus 5 x ₱3 premium surcharge
        assert_eq!(breakdown.line_items[0].amount, Money::new(50_00));
        assert_eq!(breakdown.line_items[1].label, "premium paper surcharge");
        assert_eq!(breakdown.line_items[1].amount, Money::new(15_00));
        assert_eq!(breakdown.total, Money::new(65_00));
    }

    #[tokio::test]
    async fn test_document_printer_rejects_empty_jobs() {
        let request = UsageRequest::DocumentPrinter {
            jobs: vec![],
            binding: true,
        };
        let err = calculator().calculate(&request).await.unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidInput { ref field, .. } if field == "jobs"
        ));
    }

    #[tokio::test]
    async fn test_document_printer_rejects_zero_pages_naming_the_job() {
        let request = UsageRequest::DocumentPrinter {
            jobs: vec![DocumentPrintJob {
                pages: 0,
                copies: 1,
                paper_size: PaperSize::A4,
                color_mode: ColorMode::BlackWhite,
                paper_type: PaperType::Standard,
            }],
            binding: false,
        };
        let err = calculator().calculate(&request).await.unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidInput { ref field, .. } if field == "jobs[0].pages"
        ));
    }

    #[tokio::test]
    async fn test_tools_scenario() {
        let mut catalog = MockCatalogLookup::new();
        catalog
            .expect_get_item()
            .returning(|_| Ok(Some(screwdriver())));
        let calc = CostCalculator::new(RateTable::standard(), Arc::new(catalog));

        let request = UsageRequest::ToolsOrComponents {
            selections: vec![CatalogSelection {
                catalog_item_id: "tool_scrwdrvr".to_string(),
                quantity: 1,
            }],
        };
        let breakdown = calc.calculate(&request).await.unwrap();

        assert_eq!(breakdown.line_items.len(), 1);
        assert_eq!(breakdown.line_items[0].label, "Screwdriver x1");
        assert_eq!(breakdown.total, Money::new(850_00));
    }

    #[tokio::test]
    async fn test_tools_zero_quantity_selections_are_dropped() {
        let mut catalog = MockCatalogLookup::new();
        catalog
            .expect_get_item()
            .times(1)
            .returning(|_| Ok(Some(screwdriver())));
        let calc = CostCalculator::new(RateTable::standard(), Arc::new(catalog));

        let request = UsageRequest::ToolsOrComponents {
            selections: vec![
                CatalogSelection {
                    catalog_item_id: "comp_unwanted".to_string(),
                    quantity: 0,
                },
                CatalogSelection {
                    catalog_item_id: "tool_scrwdrvr".to_string(),
                    quantity: 2,
                },
            ],
        };
        let breakdown = calc.calculate(&request).await.unwrap();

        // The zero-quantity selection produced no line, not a zero-priced one
        assert_eq!(breakdown.line_items.len(), 1);
        assert_eq!(breakdown.total, Money::new(1700_00));
    }

    #[tokio::test]
    async fn test_tools_all_zero_quantities_is_empty_selection() {
        let request = UsageRequest::ToolsOrComponents {
            selections: vec![CatalogSelection {
                catalog_item_id: "tool_scrwdrvr".to_string(),
                quantity: 0,
            }],
        };
        let err = calculator().calculate(&request).await.unwrap_err();
        assert_eq!(err, PricingError::EmptySelection);
    }

    #[tokio::test]
    async fn test_tools_no_selections_is_empty_selection() {
        let request = UsageRequest::ToolsOrComponents { selections: vec![] };
        let err = calculator().calculate(&request).await.unwrap_err();
        assert_eq!(err, PricingError::EmptySelection);
    }

    #[tokio::test]
    async fn test_tools_unknown_item_is_not_found() {
        let mut catalog = MockCatalogLookup::new();
        catalog.expect_get_item().returning(|_| Ok(None));
        let calc = CostCalculator::new(RateTable::standard(), Arc::new(catalog));

        let request = UsageRequest::ToolsOrComponents {
            selections: vec![CatalogSelection {
                catalog_item_id: "tool_missing1".to_string(),
                quantity: 1,
            }],
        };
        let err = calc.calculate(&request).await.unwrap_err();
        assert_eq!(err, PricingError::ItemNotFound("tool_missing1".to_string()));
    }

    #[tokio::test]
    async fn test_calculation_is_deterministic() {
        let request = UsageRequest::Printer3d {
            filament_weight_grams: 123.4,
            filament_type: FilamentType::Abs,
            printing_hours: 3.75,
        };
        let calc = calculator();
        let first = calc.calculate(&request).await.unwrap();
        let second = calc.calculate(&request).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_totals_are_additive_and_non_negative() {
        let requests = vec![
            UsageRequest::Printer3d {
                filament_weight_grams: 33.3,
                filament_type: FilamentType::Pla,
                printing_hours: 0.25,
            },
            UsageRequest::Soldering { hours_used: 7.2 },
            UsageRequest::DocumentPrinter {
                jobs: vec![DocumentPrintJob {
                    pages: 7,
                    copies: 3,
                    paper_size: PaperSize::Letter,
                    color_mode: ColorMode::Color,
                    paper_type: PaperType::Premium,
                }],
                binding: true,
            },
        ];

        let calc = calculator();
        for request in requests {
            let breakdown = calc.calculate(&request).await.unwrap();
            let sum: i64 = breakdown.line_items.iter().map(|l| l.amount.amount).sum();
            assert_eq!(breakdown.total.amount, sum);
            assert!(breakdown.total.amount >= 0);
            assert!(breakdown.line_items.iter().all(|l| l.amount.amount >= 0));
        }
    }

    #[tokio::test]
    async fn test_kind_dispatch_matches_request() {
        let request = UsageRequest::Soldering { hours_used: 1.0 };
        assert_eq!(request.kind(), ServiceKind::Soldering);
    }
}
