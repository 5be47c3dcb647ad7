//! Shipment vocabulary: how cargo travels, what it is, and how big it is.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shipping method; determines the base per-kilogram rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Maritime,
    Aerial,
    Terrestrial,
    Express,
}

impl TransportMode {
    pub const ALL: &'static [TransportMode] =
        &[Self::Maritime, Self::Aerial, Self::Terrestrial, Self::Express];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maritime => "maritime",
            Self::Aerial => "aerial",
            Self::Terrestrial => "terrestrial",
            Self::Express => "express",
        }
    }

    /// Parse a form value. Unknown values yield `None`, which leaves the
    /// request without a transport mode.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "maritime" => Some(Self::Maritime),
            "aerial" => Some(Self::Aerial),
            "terrestrial" => Some(Self::Terrestrial),
            "express" => Some(Self::Express),
            _ => None,
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk/handling category of the goods.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CargoType {
    #[default]
    General,
    Fragile,
    Dangerous,
    Perishable,
    Valuable,
}

impl CargoType {
    pub const ALL: &'static [CargoType] = &[
        Self::General,
        Self::Fragile,
        Self::Dangerous,
        Self::Perishable,
        Self::Valuable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Fragile => "fragile",
            Self::Dangerous => "dangerous",
            Self::Perishable => "perishable",
            Self::Valuable => "valuable",
        }
    }

    /// Parse a form value, falling back to `General` for anything unrecognized.
    pub fn from_code_or_general(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "fragile" => Self::Fragile,
            "dangerous" => Self::Dangerous,
            "perishable" => Self::Perishable,
            "valuable" => Self::Valuable,
            _ => Self::General,
        }
    }
}

impl fmt::Display for CargoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Package dimensions in centimeters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length_cm: f64,
    pub width_cm: f64,
    pub height_cm: f64,
}

impl Dimensions {
    pub fn new(length_cm: f64, width_cm: f64, height_cm: f64) -> Self {
        Self {
            length_cm,
            width_cm,
            height_cm,
        }
    }

    /// Volume in cubic meters.
    pub fn volume_m3(&self) -> f64 {
        (self.length_cm * self.width_cm * self.height_cm) / 1_000_000.0
    }
}

/// Optional services a shipper can add to a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdditionalService {
    Insurance,
    Tracking,
    Packaging,
    Customs,
}

/// Independently toggled additional services.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectedServices {
    pub insurance: bool,
    pub tracking: bool,
    pub packaging: bool,
    pub customs: bool,
}

impl SelectedServices {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, service: AdditionalService) -> bool {
        match service {
            AdditionalService::Insurance => self.insurance,
            AdditionalService::Tracking => self.tracking,
            AdditionalService::Packaging => self.packaging,
            AdditionalService::Customs => self.customs,
        }
    }

    pub fn with(mut self, service: AdditionalService) -> Self {
        match service {
            AdditionalService::Insurance => self.insurance = true,
            AdditionalService::Tracking => self.tracking = true,
            AdditionalService::Packaging => self.packaging = true,
            AdditionalService::Customs => self.customs = true,
        }
        self
    }
}

// ── Tests ──────────────────────────────────────────────────────
