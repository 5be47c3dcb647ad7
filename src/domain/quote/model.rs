//! Quote request and itemized cost breakdown

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::shipment::{CargoType, Dimensions, SelectedServices, TransportMode};

/// A shipment to be priced. Built per call by the form adapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteRequest {
    pub origin_country: Option<String>,
    /// Informational only; not used in pricing
    pub origin_city: Option<String>,
    pub dest_country: Option<String>,
    /// Informational only; not used in pricing
    pub dest_city: Option<String>,
    pub weight_kg: f64,
    pub dimensions: Dimensions,
    pub cargo_type: CargoType,
    /// Basis for the insurance premium
    pub declared_value: f64,
    pub transport_mode: Option<TransportMode>,
    pub services: SelectedServices,
}

impl QuoteRequest {
    pub fn new(
        origin_country: impl Into<String>,
        dest_country: impl Into<String>,
        weight_kg: f64,
        transport_mode: TransportMode,
    ) -> Self {
        Self {
            origin_country: Some(origin_country.into()),
            dest_country: Some(dest_country.into()),
            weight_kg,
            transport_mode: Some(transport_mode),
            ..Default::default()
        }
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = dimensions;
        self
    }

    pub fn with_cargo_type(mut self, cargo_type: CargoType) -> Self {
        self.cargo_type = cargo_type;
        self
    }

    pub fn with_declared_value(mut self, declared_value: f64) -> Self {
        self.declared_value = declared_value;
        self
    }

    pub fn with_services(mut self, services: SelectedServices) -> Self {
        self.services = services;
        self
    }

    pub fn with_cities(mut self, origin_city: &str, dest_city: &str) -> Self {
        self.origin_city = Some(origin_city.to_string());
        self.dest_city = Some(dest_city.to_string());
        self
    }

    /// Origin country, treating blank strings as absent.
    pub fn origin(&self) -> Option<&str> {
        non_blank(self.origin_country.as_deref())
    }

    /// Destination country, treating blank strings as absent.
    pub fn destination(&self) -> Option<&str> {
        non_blank(self.dest_country.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// One line of a cost breakdown, in computation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostLine {
    Transport,
    Volumetric,
    Distance,
    Insurance,
    Tracking,
    Packaging,
    Customs,
    Taxes,
}

impl CostLine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Volumetric => "volumetric",
            Self::Distance => "distance",
            Self::Insurance => "insurance",
            Self::Tracking => "tracking",
            Self::Packaging => "packaging",
            Self::Customs => "customs",
            Self::Taxes => "taxes",
        }
    }

    /// Display label for the itemized quote.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transport => "Base transport",
            Self::Volumetric => "Volumetric weight",
            Self::Distance => "Distance factor",
            Self::Insurance => "Insurance",
            Self::Tracking => "Premium tracking",
            Self::Packaging => "Special packaging",
            Self::Customs => "Customs handling",
            Self::Taxes => "Taxes and fees",
        }
    }
}

impl fmt::Display for CostLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub line: CostLine,
    /// USD, unrounded
    pub amount: f64,
}

/// Itemized quote in USD.
///
/// Lines keep their insertion order and `total` is always the sum of the
/// present lines. An empty breakdown means the request was incomplete.
/// Deserializing ignores any stored total and recomputes it from the lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredBreakdown")]
pub struct CostBreakdown {
    items: Vec<CostItem>,
    total: f64,
}

#[derive(Deserialize)]
struct StoredBreakdown {
    #[serde(default)]
    items: Vec<CostItem>,
}

impl From<StoredBreakdown> for CostBreakdown {
    fn from(stored: StoredBreakdown) -> Self {
        let mut breakdown = Self::empty();
        for item in stored.items {
            // first occurrence of a line wins
            if !breakdown.contains(item.line) {
                breakdown.push(item.line, item.amount);
            }
        }
        breakdown
    }
}

impl CostBreakdown {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, line: CostLine, amount: f64) {
        debug_assert!(self.get(line).is_none(), "duplicate cost line {}", line);
        self.items.push(CostItem { line, amount });
        self.total = self.items.iter().map(|item| item.amount).sum();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[CostItem] {
        &self.items
    }

    pub fn get(&self, line: CostLine) -> Option<f64> {
        self.items
            .iter()
            .find(|item| item.line == line)
            .map(|item| item.amount)
    }

    pub fn contains(&self, line: CostLine) -> bool {
        self.get(line).is_some()
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Sum of every line except taxes.
    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .filter(|item| item.line != CostLine::Taxes)
            .map(|item| item.amount)
            .sum()
    }

    pub fn format_total(&self) -> String {
        format_usd(self.total)
    }
}

/// `$1234.50` style, two decimals.
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

// ── Tests ──────────────────────────────────────────────────────
