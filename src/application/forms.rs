//! Quote form adapter
//!
//! Turns raw form fields (text inputs, selects and checkboxes, all as
//! strings/booleans) into a [`QuoteRequest`]. Numeric coercion lives here so
//! the calculator only ever sees finite numbers. Cities are kept only when
//! they belong to the selected country in the [`CityCatalog`].

use serde::{Deserialize, Serialize};

use crate::domain::{
    city_slug, CargoType, CityCatalog, Dimensions, QuoteRequest, SelectedServices, TransportMode,
};

/// Raw quote form as submitted by the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteForm {
    pub origin_country: String,
    pub origin_city: String,
    pub dest_country: String,
    pub dest_city: String,
    pub weight: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub cargo_type: String,
    pub declared_value: String,
    pub transport: String,
    pub insurance: bool,
    pub tracking: bool,
    pub packaging: bool,
    pub customs: bool,
}

impl QuoteForm {
    pub fn into_request(self) -> QuoteRequest {
        self.into_request_with(&CityCatalog::default())
    }

    /// Like [`QuoteForm::into_request`], checking cities against `catalog`.
    pub fn into_request_with(self, catalog: &CityCatalog) -> QuoteRequest {
        let origin_country = selected(&self.origin_country, true);
        let dest_country = selected(&self.dest_country, true);
        QuoteRequest {
            origin_city: city_of(catalog, origin_country.as_deref(), &self.origin_city),
            dest_city: city_of(catalog, dest_country.as_deref(), &self.dest_city),
            origin_country,
            dest_country,
            weight_kg: parse_amount(&self.weight),
            dimensions: Dimensions::new(
                parse_amount(&self.length),
                parse_amount(&self.width),
                parse_amount(&self.height),
            ),
            cargo_type: CargoType::from_code_or_general(&self.cargo_type),
            declared_value: parse_amount(&self.declared_value),
            transport_mode: TransportMode::from_code(&self.transport),
            services: SelectedServices {
                insurance: self.insurance,
                tracking: self.tracking,
                packaging: self.packaging,
                customs: self.customs,
            },
        }
    }
}

impl From<QuoteForm> for QuoteRequest {
    fn from(form: QuoteForm) -> Self {
        form.into_request()
    }
}

/// Parse a numeric input. Blank, malformed and non-finite values become 0;
/// negative values are clamped to 0.
pub fn parse_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value.max(0.0),
        _ => 0.0,
    }
}

fn selected(raw: &str, lowercase: bool) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        None
    } else if lowercase {
        Some(value.to_lowercase())
    } else {
        Some(value.to_string())
    }
}

/// Slug of `raw` when it is a city of `country`, otherwise `None`.
fn city_of(catalog: &CityCatalog, country: Option<&str>, raw: &str) -> Option<String> {
    let slug = city_slug(selected(raw, false)?.as_str());
    catalog
        .contains_city(country?, &slug)
        .then_some(slug)
}

// ── Tests ──────────────────────────────────────────────────────
