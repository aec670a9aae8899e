use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Currency for all amounts in this installation
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    /// Philippine peso
    #[default]
    Php,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Php => "₱",
        }
    }
}

/// Money representation with precision
///
/// Amounts are stored in the smallest currency unit (centavos), so adding
/// line items never accumulates floating-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Money {
    /// Amount in the smallest currency unit (centavos)
    pub amount: i64,
    /// Currency type
    pub currency: Currency,
    /// Number of decimal places (2 for centavos)
    pub decimal_places: i32,
}

impl Money {
    /// Create a new Money value from minor units
    pub fn new(amount: i64) -> Self {
        Self {
            amount,
            currency: Currency::Php,
            decimal_places: 2,
        }
    }

    /// Create Money from a decimal value (e.g., 192.50), rounding to centavos
    pub fn from_decimal(value: f64) -> Self {
        Self::new((value * 100.0).round() as i64)
    }

    /// Convert to a decimal value
    pub fn to_decimal(&self) -> f64 {
        self.amount as f64 / 10f64.powi(self.decimal_places)
    }

    pub fn zero() -> Self {
        Self::new(0)
    }

    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            abs / 100,
            abs % 100
        )
    }
}

/// The service kinds a payment can be recorded against
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceKind {
    /// 3D printer (filament + power)
    Printer3d,
    /// Soldering station time
    Soldering,
    /// Document printing
    DocumentPrinter,
    /// Tool and component purchases
    ToolsOrComponents,
}

/// Filament types stocked for the 3D printer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum FilamentType {
    Pla,
    Abs,
}

/// Paper sizes the document printer supports
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum PaperSize {
    A4,
    A3,
    Letter,
}

/// Color mode for a document print job
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorMode {
    BlackWhite,
    Color,
}

/// Paper stock for a document print job
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaperType {
    #[default]
    Standard,
    Premium,
}

/// One document print job within a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DocumentPrintJob {
    /// Pages in the document (≥ 1)
    pub pages: u32,
    /// Copies to print (≥ 1)
    #[serde(default = "default_copies")]
    pub copies: u32,
    pub paper_size: PaperSize,
    pub color_mode: ColorMode,
    #[serde(default)]
    pub paper_type: PaperType,
}

fn default_copies() -> u32 {
    1
}

/// One catalog selection within a tools/components request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CatalogSelection {
    /// Catalog item identifier (e.g., `tool_V1StGXR8`)
    pub catalog_item_id: String,
    /// Requested quantity; zero removes the selection
    pub quantity: u32,
}

/// A usage description submitted for pricing.
///
/// Transient: validated, priced once, and discarded. Only the resulting
/// [`CostBreakdown`] is retained (inside the payment record, for audit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "service_kind", rename_all = "snake_case")]
pub enum UsageRequest {
    /// 3D printer usage: filament consumed plus printer power time
    Printer3d {
        /// Filament consumed in grams (> 0)
        filament_weight_grams: f64,
        filament_type: FilamentType,
        /// Printer runtime in hours (> 0)
        printing_hours: f64,
    },
    /// Soldering station usage
    Soldering {
        /// Station time in hours (> 0)
        hours_used: f64,
    },
    /// Document printing: one or more jobs, optional binding
    DocumentPrinter {
        jobs: Vec<DocumentPrintJob>,
        /// Adds one flat binding fee for the whole request
        #[serde(default)]
        binding: bool,
    },
    /// Tool/component purchases resolved against the catalog
    ToolsOrComponents { selections: Vec<CatalogSelection> },
}

impl UsageRequest {
    pub fn kind(&self) -> ServiceKind {
        match self {
            Self::Printer3d { .. } => ServiceKind::Printer3d,
            Self::Soldering { .. } => ServiceKind::Soldering,
            Self::DocumentPrinter { .. } => ServiceKind::DocumentPrinter,
            Self::ToolsOrComponents { .. } => ServiceKind::ToolsOrComponents,
        }
    }
}

/// One labeled amount within a cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    pub label: String,
    pub amount: Money,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }
}

/// Itemized calculation result.
///
/// Only constructed through [`CostBreakdown::from_lines`], so the total is
/// always the exact sum of the line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CostBreakdown {
    /// Ordered line items, in calculation order
    pub line_items: Vec<LineItem>,
    /// Sum of all line item amounts
    pub total: Money,
}

impl CostBreakdown {
    /// Build a breakdown whose total is the sum of the given lines.
    pub fn from_lines(line_items: Vec<LineItem>) -> Self {
        let total = Money::new(line_items.iter().map(|l| l.amount.amount).sum());
        Self { line_items, total }
    }
}
