//! Configuration module
//!
//! Reads `config.toml` from `$FREIGHT_QUOTE_CONFIG` or the platform config
//! directory (`~/.config/freight-quote/config.toml` on Linux). A missing file
//! yields the default configuration.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::{CargoType, RateTables, RouteKey, ServiceRates, TransportMode};

pub const CONFIG_ENV_VAR: &str = "FREIGHT_QUOTE_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("freight-quote")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    #[validate(nested)]
    pub logging: LoggingConfig,
    #[validate(nested)]
    pub rates: RatesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` env-filter directive, e.g. `info` or `freight_quote=debug`
    #[validate(length(min = 1, message = "log level must not be empty"))]
    pub level: String,
    /// `text` or `json`
    #[validate(custom(function = "validate_log_format"))]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// `[rates]` section; converted into [`RateTables`] with [`RatesConfig::to_tables`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_routes"))]
pub struct RatesConfig {
    #[validate(custom(function = "validate_rate"))]
    pub volumetric_factor: f64,
    #[validate(custom(function = "validate_rate"))]
    pub volumetric_surcharge_rate: f64,
    #[validate(custom(function = "validate_rate"))]
    pub distance_surcharge_rate: f64,
    #[validate(
        custom(function = "validate_rate"),
        range(max = 1.0, message = "tax rate must be between 0 and 1")
    )]
    pub tax_rate: f64,
    /// Keyed by transport mode (`maritime`, `aerial`, `terrestrial`, `express`)
    #[validate(custom(function = "validate_base_tariffs"))]
    pub base_tariffs: BTreeMap<String, f64>,
    /// Keyed by cargo type (`general`, `fragile`, ...)
    #[validate(custom(function = "validate_cargo_multipliers"))]
    pub cargo_multipliers: BTreeMap<String, f64>,
    #[validate(nested)]
    pub services: ServicesConfig,
    #[validate(nested)]
    pub routes: Vec<RouteConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServicesConfig {
    #[validate(custom(function = "validate_rate"))]
    pub insurance: f64,
    #[validate(custom(function = "validate_rate"))]
    pub tracking: f64,
    #[validate(custom(function = "validate_rate"))]
    pub packaging: f64,
    #[validate(custom(function = "validate_rate"))]
    pub customs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RouteConfig {
    #[validate(length(min = 1))]
    pub origin: String,
    #[validate(length(min = 1))]
    pub destination: String,
    #[validate(custom(function = "validate_rate"))]
    pub multiplier: f64,
}

impl RouteConfig {
    fn key(&self) -> RouteKey {
        RouteKey::new(
            self.origin.trim().to_lowercase(),
            self.destination.trim().to_lowercase(),
        )
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        ServiceRates::default().into()
    }
}

impl From<ServiceRates> for ServicesConfig {
    fn from(s: ServiceRates) -> Self {
        Self {
            insurance: s.insurance_rate,
            tracking: s.tracking_fee,
            packaging: s.packaging_per_kg,
            customs: s.customs_fee,
        }
    }
}

impl From<&ServicesConfig> for ServiceRates {
    fn from(s: &ServicesConfig) -> Self {
        Self {
            insurance_rate: s.insurance,
            tracking_fee: s.tracking,
            packaging_per_kg: s.packaging,
            customs_fee: s.customs,
        }
    }
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self::from(&RateTables::default())
    }
}

impl From<&RateTables> for RatesConfig {
    fn from(t: &RateTables) -> Self {
        let mut routes: Vec<RouteConfig> = t
            .distance_multipliers
            .iter()
            .map(|(key, multiplier)| RouteConfig {
                origin: key.origin.clone(),
                destination: key.destination.clone(),
                multiplier: *multiplier,
            })
            .collect();
        routes.sort_by(|a, b| (&a.origin, &a.destination).cmp(&(&b.origin, &b.destination)));

        Self {
            volumetric_factor: t.volumetric_factor,
            volumetric_surcharge_rate: t.volumetric_surcharge_rate,
            distance_surcharge_rate: t.distance_surcharge_rate,
            tax_rate: t.tax_rate,
            base_tariffs: t
                .base_tariffs
                .iter()
                .map(|(mode, rate)| (mode.to_string(), *rate))
                .collect(),
            cargo_multipliers: t
                .cargo_multipliers
                .iter()
                .map(|(cargo, m)| (cargo.to_string(), *m))
                .collect(),
            services: t.services.into(),
            routes,
        }
    }
}

impl RatesConfig {
    /// Build rate tables. Keys that do not name a transport mode or cargo
    /// type are skipped; [`Validate`] reports them.
    pub fn to_tables(&self) -> RateTables {
        RateTables {
            base_tariffs: self
                .base_tariffs
                .iter()
                .filter_map(|(code, rate)| Some((TransportMode::from_code(code)?, *rate)))
                .collect(),
            cargo_multipliers: self
                .cargo_multipliers
                .iter()
                .filter_map(|(code, m)| Some((cargo_type(code)?, *m)))
                .collect(),
            services: ServiceRates::from(&self.services),
            distance_multipliers: self
                .routes
                .iter()
                .map(|r| (r.key(), r.multiplier))
                .collect(),
            volumetric_factor: self.volumetric_factor,
            volumetric_surcharge_rate: self.volumetric_surcharge_rate,
            distance_surcharge_rate: self.distance_surcharge_rate,
            tax_rate: self.tax_rate,
        }
    }

    /// Trim and lowercase route country codes in place.
    pub fn normalize_routes(&mut self) {
        for route in &mut self.routes {
            let RouteKey {
                origin,
                destination,
            } = route.key();
            route.origin = origin;
            route.destination = destination;
        }
    }
}

impl AppConfig {
    /// Load from `path`; a missing file yields defaults. The result is validated.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(raw)?;
        config.rates.normalize_routes();
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_toml()?).map_err(io_err)
    }

    pub fn rate_tables(&self) -> RateTables {
        self.rates.to_tables()
    }
}

fn cargo_type(code: &str) -> Option<CargoType> {
    CargoType::ALL
        .iter()
        .copied()
        .find(|cargo| cargo.as_str() == code.trim().to_ascii_lowercase())
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn validate_log_format(format: &str) -> Result<(), ValidationError> {
    match format.to_lowercase().as_str() {
        "text" | "json" => Ok(()),
        _ => Err(invalid("log_format", "log format must be 'text' or 'json'")),
    }
}

fn validate_rate(rate: f64) -> Result<(), ValidationError> {
    if rate.is_finite() && rate >= 0.0 {
        Ok(())
    } else {
        Err(invalid("rate", "rates must be finite and non-negative"))
    }
}

fn validate_routes(rates: &RatesConfig) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for key in rates.routes.iter().map(RouteConfig::key) {
        if key.origin.is_empty() || key.destination.is_empty() {
            return Err(invalid("routes", "route countries must not be blank"));
        }
        if !seen.insert(key) {
            return Err(invalid("routes", "duplicate route"));
        }
    }
    Ok(())
}

fn validate_base_tariffs(tariffs: &BTreeMap<String, f64>) -> Result<(), ValidationError> {
    if tariffs.keys().any(|code| TransportMode::from_code(code).is_none()) {
        return Err(invalid("base_tariffs", "unknown transport mode"));
    }
    if !tariffs.values().all(|rate| rate.is_finite() && *rate >= 0.0) {
        return Err(invalid("base_tariffs", "base tariffs must be non-negative"));
    }
    Ok(())
}

fn validate_cargo_multipliers(multipliers: &BTreeMap<String, f64>) -> Result<(), ValidationError> {
    if multipliers.keys().any(|code| cargo_type(code).is_none()) {
        return Err(invalid("cargo_multipliers", "unknown cargo type"));
    }
    if !multipliers.values().all(|m| m.is_finite() && *m >= 1.0) {
        return Err(invalid("cargo_multipliers", "cargo multipliers must be at least 1.0"));
    }
    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_standard_tables() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rate_tables(), RateTables::default());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig::default();
        let raw = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&raw).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let raw = r#"
            [logging]
            level = "debug"

            [rates]
            tax_rate = 0.12

            [rates.base_tariffs]
            maritime = 3.0

            [[rates.routes]]
            origin = "USA"
            destination = "Chile"
            multiplier = 1.4
        "#;
        let config = AppConfig::from_toml(raw).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "text");

        let tables = config.rate_tables();
        assert_eq!(tables.tax_rate, 0.12);
        assert_eq!(tables.base_tariff(TransportMode::Maritime), Some(3.0));
        // A listed table replaces the default one entirely.
        assert_eq!(tables.base_tariff(TransportMode::Aerial), None);
        assert_eq!(tables.distance_multiplier("usa", "chile"), 1.4);
        assert_eq!(tables.distance_multiplier("china", "ecuador"), 1.0);
        assert_eq!(tables.volumetric_factor, 167.0);
    }

    #[test]
    fn rejects_cargo_multiplier_below_one() {
        let raw = r#"
            [rates.cargo_multipliers]
            fragile = 0.5
        "#;
        assert!(matches!(
            AppConfig::from_toml(raw),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_tax_and_bad_format() {
        assert!(matches!(
            AppConfig::from_toml("[rates]\ntax_rate = 1.5\n"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            AppConfig::from_toml("[logging]\nformat = \"xml\"\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_unknown_table_keys() {
        let raw = "[rates.base_tariffs]\nrail = 1.0\n";
        assert!(matches!(AppConfig::from_toml(raw), Err(ConfigError::Invalid(_))));
        let raw = "[rates.cargo_multipliers]\nlivestock = 1.2\n";
        assert!(matches!(AppConfig::from_toml(raw), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_non_finite_rates() {
        for raw in [
            "[rates]\ntax_rate = nan\n",
            "[rates]\nvolumetric_factor = inf\n",
            "[rates.services]\ntracking = nan\n",
            "[[rates.routes]]\norigin = \"china\"\ndestination = \"ecuador\"\nmultiplier = inf\n",
        ] {
            assert!(
                matches!(AppConfig::from_toml(raw), Err(ConfigError::Invalid(_))),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn routes_are_normalized() {
        let raw = r#"
            [[rates.routes]]
            origin = "  USA "
            destination = "Chile"
            multiplier = 1.4
        "#;
        let config = AppConfig::from_toml(raw).unwrap();
        assert_eq!(config.rates.routes[0].origin, "usa");
        assert_eq!(config.rates.routes[0].destination, "chile");
    }

    #[test]
    fn rejects_duplicate_and_blank_routes() {
        let duplicate = r#"
            [[rates.routes]]
            origin = "USA"
            destination = "Chile"
            multiplier = 1.4

            [[rates.routes]]
            origin = "usa"
            destination = "chile"
            multiplier = 2.0
        "#;
        assert!(matches!(
            AppConfig::from_toml(duplicate),
            Err(ConfigError::Invalid(_))
        ));

        let blank = r#"
            [[rates.routes]]
            origin = "   "
            destination = "chile"
            multiplier = 1.4
        "#;
        assert!(matches!(
            AppConfig::from_toml(blank),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(
            AppConfig::from_toml("[rates\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("freight-quote-missing-config.toml");
        let _ = fs::remove_file(&path);
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join(format!("freight-quote-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let mut config = AppConfig::default();
        config.logging.format = "json".into();
        config.save(&path).unwrap();

        assert_eq!(AppConfig::load(&path).unwrap(), config);
        let _ = fs::remove_dir_all(&dir);
    }
}
