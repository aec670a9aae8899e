//! Rate table: the static pricing configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

use crate::error::{PricingError, PricingResult};
use crate::models::{ColorMode, FilamentType, Money, PaperSize};

/// Services billed by the hour
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HourlyService {
    /// Soldering station time
    Soldering,
    /// 3D printer power consumption
    Printer3dPower,
}

/// Immutable pricing configuration, built once at startup and shared
/// read-only with every calculator.
///
/// Lookups for a combination the table does not carry fail with
/// [`PricingError::Configuration`] rather than defaulting to zero; a gap in
/// the table is a deployment defect and must surface loudly.
#[derive(Debug, Clone)]
pub struct RateTable {
    hourly_rates: HashMap<HourlyService, Money>,
    filament_prices: HashMap<FilamentType, Money>,
    document_print_rates: HashMap<(PaperSize, ColorMode), Money>,
    premium_paper_surcharges: HashMap<PaperSize, Money>,
    binding_fee: Money,
    spool_weight_grams: f64,
}

impl RateTable {
    /// Build a table from explicit rate maps, rejecting negative rates.
    pub fn new(
        hourly_rates: HashMap<HourlyService, Money>,
        filament_prices: HashMap<FilamentType, Money>,
        document_print_rates: HashMap<(PaperSize, ColorMode), Money>,
        premium_paper_surcharges: HashMap<PaperSize, Money>,
        binding_fee: Money,
        spool_weight_grams: f64,
    ) -> PricingResult<Self> {
        let any_negative = hourly_rates.values().any(Money::is_negative)
            || filament_prices.values().any(Money::is_negative)
            || document_print_rates.values().any(Money::is_negative)
            || premium_paper_surcharges.values().any(Money::is_negative)
            || binding_fee.is_negative();
        if any_negative {
            return Err(PricingError::Configuration(
                "rates must be non-negative".to_string(),
            ));
        }
        if !(spool_weight_grams > 0.0) {
            return Err(PricingError::Configuration(
                "spool weight must be positive".to_string(),
            ));
        }

        Ok(Self {
            hourly_rates,
            filament_prices,
            document_print_rates,
            premium_paper_surcharges,
            binding_fee,
            spool_weight_grams,
        })
    }

    /// The standard rate card for this installation.
    ///
    /// Hourly: soldering ₱10, 3D printer power ₱5. Filament per 1kg spool:
    /// PLA ₱1200, ABS ₱1350. Document printing per page: A4/Letter ₱2 bw /
    /// ₱5 color, A3 ₱4 bw / ₱10 color; premium paper adds ₱2 (₱3 for A3)
    /// per page. Binding is a flat ₱50.
    pub fn standard() -> Self {
        use ColorMode::*;
        use PaperSize::*;

        Self {
            hourly_rates: HashMap::from([
                (HourlyService::Soldering, Money::new(10_00)),
                (HourlyService::Printer3dPower, Money::new(5_00)),
            ]),
            filament_prices: HashMap::from([
                (FilamentType::Pla, Money::new(1200_00)),
                (FilamentType::Abs, Money::new(1350_00)),
            ]),
            document_print_rates: HashMap::from([
                ((A4, BlackWhite), Money::new(2_00)),
                ((A3, BlackWhite), Money::new(4_00)),
                ((Letter, BlackWhite), Money::new(2_00)),
                ((A4, Color), Money::new(5_00)),
                ((A3, Color), Money::new(10_00)),
                ((Letter, Color), Money::new(5_00)),
            ]),
            premium_paper_surcharges: HashMap::from([
                (A4, Money::new(2_00)),
                (A3, Money::new(3_00)),
                (Letter, Money::new(2_00)),
            ]),
            binding_fee: Money::new(50_00),
            spool_weight_grams: 1000.0,
        }
    }

    pub fn hourly_rate(&self, service: HourlyService) -> PricingResult<Money> {
        self.hourly_rates.get(&service).copied().ok_or_else(|| {
            PricingError::Configuration(format!("no hourly rate configured for {}", service))
        })
    }

    /// Price per spool for the given filament type.
    pub fn filament_price(&self, filament_type: FilamentType) -> PricingResult<Money> {
        self.filament_prices
            .get(&filament_type)
            .copied()
            .ok_or_else(|| {
                PricingError::Configuration(format!(
                    "no filament price configured for {}",
                    filament_type
                ))
            })
    }

    /// Per-page print rate for the given paper size and color mode.
    pub fn document_rate(&self, size: PaperSize, mode: ColorMode) -> PricingResult<Money> {
        self.document_print_rates
            .get(&(size, mode))
            .copied()
            .ok_or_else(|| {
                PricingError::Configuration(format!(
                    "no print rate configured for {} {}",
                    size, mode
                ))
            })
    }

    /// Per-page surcharge for premium paper of the given size.
    pub fn premium_surcharge(&self, size: PaperSize) -> PricingResult<Money> {
        self.premium_paper_surcharges
            .get(&size)
            .copied()
            .ok_or_else(|| {
                PricingError::Configuration(format!(
                    "no premium paper surcharge configured for {}",
                    size
                ))
            })
    }

    pub fn binding_fee(&self) -> Money {
        self.binding_fee
    }

    /// Weight of one filament spool, the denominator for filament pricing.
    pub fn spool_weight_grams(&self) -> f64 {
        self.spool_weight_grams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_covers_all_combinations() {
        let rates = RateTable::standard();

        for service in [HourlyService::Soldering, HourlyService::Printer3dPower] {
            assert!(rates.hourly_rate(service).is_ok());
        }
        for filament in [FilamentType::Pla, FilamentType::Abs] {
            assert!(rates.filament_price(filament).is_ok());
        }
        for size in [PaperSize::A4, PaperSize::A3, PaperSize::Letter] {
            for mode in [ColorMode::BlackWhite, ColorMode::Color] {
                assert!(rates.document_rate(size, mode).is_ok());
            }
            assert!(rates.premium_surcharge(size).is_ok());
        }
    }

    #[test]
    fn test_standard_rates_match_the_rate_card() {
        let rates = RateTable::standard();
        assert_eq!(
            rates.hourly_rate(HourlyService::Soldering).unwrap(),
            Money::new(10_00)
        );
        assert_eq!(
            rates.filament_price(FilamentType::Pla).unwrap(),
            Money::new(1200_00)
        );
        assert_eq!(
            rates
                .document_rate(PaperSize::A3, ColorMode::Color)
                .unwrap(),
            Money::new(10_00)
        );
        assert_eq!(rates.binding_fee(), Money::new(50_00));
        assert_eq!(rates.spool_weight_grams(), 1000.0);
    }

    #[test]
    fn test_missing_entry_is_a_configuration_error() {
        let rates = RateTable::new(
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            Money::zero(),
            1000.0,
        )
        .unwrap();

        let err = rates.hourly_rate(HourlyService::Soldering).unwrap_err();
        assert!(matches!(err, PricingError::Configuration(_)));
    }

    #[test]
    fn test_negative_rate_rejected() {
        let result = RateTable::new(
            HashMap::from([(HourlyService::Soldering, Money::new(-1))]),
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            Money::zero(),
            1000.0,
        );
        assert!(matches!(result, Err(PricingError::Configuration(_))));
    }

    #[test]
    fn test_zero_spool_weight_rejected() {
        let result = RateTable::new(
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            HashMap::new(),
            Money::zero(),
            0.0,
        );
        assert!(matches!(result, Err(PricingError::Configuration(_))));
    }
}
