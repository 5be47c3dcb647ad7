//! Rate tables used to price shipment quotes

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::shipment::{CargoType, TransportMode};

/// Standard air-freight volumetric factor (kg per cubic meter).
pub const DEFAULT_VOLUMETRIC_FACTOR: f64 = 167.0;

/// Ordered (origin country, destination country) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    pub origin: String,
    pub destination: String,
}

impl RouteKey {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

/// Prices of the optional services.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServiceRates {
    /// Fraction of the declared value
    pub insurance_rate: f64,
    /// Flat USD
    pub tracking_fee: f64,
    /// USD per kilogram
    pub packaging_per_kg: f64,
    /// Flat USD
    pub customs_fee: f64,
}

impl Default for ServiceRates {
    fn default() -> Self {
        Self {
            insurance_rate: 0.02,
            tracking_fee: 25.0,
            packaging_per_kg: 1.5,
            customs_fee: 150.0,
        }
    }
}

/// Immutable pricing configuration.
///
/// Built once (from defaults or the `[rates]` config section) and passed into
/// the calculator by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTables {
    /// USD per kilogram for each transport mode
    pub base_tariffs: HashMap<TransportMode, f64>,
    pub cargo_multipliers: HashMap<CargoType, f64>,
    pub services: ServiceRates,
    pub distance_multipliers: HashMap<RouteKey, f64>,
    /// Kilograms of chargeable weight per cubic meter
    pub volumetric_factor: f64,
    /// Share of the base tariff charged per excess volumetric kilogram
    pub volumetric_surcharge_rate: f64,
    /// Share of the transport line charged per unit of distance multiplier
    pub distance_surcharge_rate: f64,
    pub tax_rate: f64,
}

impl RateTables {
    pub fn base_tariff(&self, mode: TransportMode) -> Option<f64> {
        self.base_tariffs.get(&mode).copied()
    }

    /// Multiplier for a cargo type; 1.0 when the table has no entry.
    pub fn cargo_multiplier(&self, cargo: CargoType) -> f64 {
        self.cargo_multipliers.get(&cargo).copied().unwrap_or(1.0)
    }

    /// Multiplier for an ordered route; 1.0 when the pair is not listed.
    pub fn distance_multiplier(&self, origin: &str, destination: &str) -> f64 {
        self.distance_multipliers
            .get(&RouteKey::new(origin, destination))
            .copied()
            .unwrap_or(1.0)
    }

    pub fn with_route(mut self, origin: &str, destination: &str, multiplier: f64) -> Self {
        self.distance_multipliers
            .insert(RouteKey::new(origin, destination), multiplier);
        self
    }
}

impl Default for RateTables {
    fn default() -> Self {
        let base_tariffs = HashMap::from([
            (TransportMode::Maritime, 2.5),
            (TransportMode::Aerial, 8.5),
            (TransportMode::Terrestrial, 4.2),
            (TransportMode::Express, 15.8),
        ]);

        let cargo_multipliers = HashMap::from([
            (CargoType::General, 1.0),
            (CargoType::Fragile, 1.3),
            (CargoType::Dangerous, 1.8),
            (CargoType::Perishable, 1.5),
            (CargoType::Valuable, 2.0),
        ]);

        let distance_multipliers = [
            ("china", "ecuador", 1.8),
            ("china", "colombia", 1.7),
            ("china", "peru", 1.6),
            ("usa", "ecuador", 1.2),
            ("usa", "colombia", 1.1),
            ("usa", "peru", 1.3),
            ("germany", "ecuador", 1.5),
            ("japan", "ecuador", 1.9),
            ("brazil", "ecuador", 0.8),
        ]
        .into_iter()
        .map(|(origin, destination, m)| (RouteKey::new(origin, destination), m))
        .collect();

        Self {
            base_tariffs,
            cargo_multipliers,
            services: ServiceRates::default(),
            distance_multipliers,
            volumetric_factor: DEFAULT_VOLUMETRIC_FACTOR,
            volumetric_surcharge_rate: 0.5,
            distance_surcharge_rate: 0.1,
            tax_rate: 0.10,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
