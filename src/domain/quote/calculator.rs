//! Quote cost calculator
//!
//! Pure functions from a [`QuoteRequest`] and [`RateTables`] to an itemized
//! [`CostBreakdown`]. No rounding happens here; formatting to cents is left
//! to the presentation layer.

use tracing::{debug, error};

use super::model::{CostBreakdown, CostLine, QuoteRequest};
use crate::domain::error::{DomainError, DomainResult, ValidationError};
use crate::domain::rates::RateTables;
use crate::domain::shipment::TransportMode;

/// Whether the request carries everything needed to be priced.
pub fn validate(request: &QuoteRequest) -> bool {
    check(request).is_ok()
}

/// Like [`validate`], but reports the first missing requirement.
pub fn check(request: &QuoteRequest) -> Result<(), ValidationError> {
    required_fields(request).map(|_| ())
}

fn required_fields(request: &QuoteRequest) -> Result<(TransportMode, &str, &str), ValidationError> {
    // Written so that NaN is rejected too.
    if !(request.weight_kg > 0.0) {
        return Err(ValidationError::NonPositiveWeight(request.weight_kg));
    }
    let mode = request
        .transport_mode
        .ok_or(ValidationError::MissingTransportMode)?;
    let origin = request
        .origin()
        .ok_or(ValidationError::MissingOriginCountry)?;
    let destination = request
        .destination()
        .ok_or(ValidationError::MissingDestinationCountry)?;
    Ok((mode, origin, destination))
}

/// Compute the itemized cost of a shipment.
///
/// Lines are produced in this order: transport, volumetric (only when the
/// volumetric weight exceeds the actual weight), distance, insurance,
/// tracking, packaging, customs, taxes. Taxes are a share of every other
/// line and are always present.
///
/// # Errors
/// * [`DomainError::Validation`] when [`check`] fails
/// * [`DomainError::Configuration`] when the transport mode has no base tariff
pub fn compute_costs(request: &QuoteRequest, tables: &RateTables) -> DomainResult<CostBreakdown> {
    let (mode, origin, destination) = required_fields(request)?;

    let tariff = tables
        .base_tariff(mode)
        .ok_or_else(|| DomainError::missing_tariff(mode))?;

    let weight = request.weight_kg;
    let mut breakdown = CostBreakdown::empty();

    let transport = weight * tariff * tables.cargo_multiplier(request.cargo_type);
    breakdown.push(CostLine::Transport, transport);

    let volumetric_weight = request.dimensions.volume_m3() * tables.volumetric_factor;
    if volumetric_weight > weight {
        let surcharge = (volumetric_weight - weight) * tariff * tables.volumetric_surcharge_rate;
        breakdown.push(CostLine::Volumetric, surcharge);
    }

    let distance_multiplier = tables.distance_multiplier(origin, destination);
    breakdown.push(
        CostLine::Distance,
        transport * distance_multiplier * tables.distance_surcharge_rate,
    );

    let services = &request.services;
    let rates = &tables.services;
    if services.insurance && request.declared_value > 0.0 {
        breakdown.push(CostLine::Insurance, request.declared_value * rates.insurance_rate);
    }
    if services.tracking {
        breakdown.push(CostLine::Tracking, rates.tracking_fee);
    }
    if services.packaging {
        breakdown.push(CostLine::Packaging, weight * rates.packaging_per_kg);
    }
    if services.customs {
        breakdown.push(CostLine::Customs, rates.customs_fee);
    }

    let taxes = breakdown.subtotal() * tables.tax_rate;
    breakdown.push(CostLine::Taxes, taxes);

    Ok(breakdown)
}

/// Price a request, mapping every failure to an empty breakdown.
///
/// An incomplete request is an ordinary business state (the form is still
/// being filled in). A configuration failure is logged at `error` because it
/// means the rate tables do not match the request types.
pub fn quote(request: &QuoteRequest, tables: &RateTables) -> CostBreakdown {
    match compute_costs(request, tables) {
        Ok(breakdown) => breakdown,
        Err(DomainError::Validation(reason)) => {
            debug!(%reason, "quote request incomplete");
            CostBreakdown::empty()
        }
        Err(e) => {
            error!(error = %e, "quote could not be priced");
            CostBreakdown::empty()
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shipment::{AdditionalService, CargoType, Dimensions, SelectedServices};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn china_to_ecuador() -> QuoteRequest {
        QuoteRequest::new("china", "ecuador", 100.0, TransportMode::Maritime)
    }

    #[test]
    fn maritime_without_services() {
        let bd = compute_costs(&china_to_ecuador(), &RateTables::default()).unwrap();

        assert_close(bd.get(CostLine::Transport).unwrap(), 250.0);
        assert!(!bd.contains(CostLine::Volumetric));
        assert_close(bd.get(CostLine::Distance).unwrap(), 45.0);
        assert_close(bd.get(CostLine::Taxes).unwrap(), 29.5);
        assert_close(bd.total(), 324.5);
        assert_eq!(bd.items().len(), 3);
    }

    #[test]
    fn insurance_on_declared_value() {
        let req = china_to_ecuador()
            .with_declared_value(5000.0)
            .with_services(SelectedServices::none().with(AdditionalService::Insurance));
        let bd = compute_costs(&req, &RateTables::default()).unwrap();

        assert_close(bd.get(CostLine::Insurance).unwrap(), 100.0);
        assert_close(bd.subtotal(), 395.0);
        assert_close(bd.get(CostLine::Taxes).unwrap(), 39.5);
        assert_close(bd.total(), 434.5);
    }

    #[test]
    fn insurance_skipped_without_declared_value() {
        let req = china_to_ecuador()
            .with_services(SelectedServices::none().with(AdditionalService::Insurance));
        let bd = compute_costs(&req, &RateTables::default()).unwrap();
        assert!(!bd.contains(CostLine::Insurance));
        assert_close(bd.total(), 324.5);
    }

    #[test]
    fn volumetric_surcharge_for_light_bulky_cargo() {
        let req = QuoteRequest::new("usa", "chile", 10.0, TransportMode::Aerial)
            .with_dimensions(Dimensions::new(100.0, 100.0, 100.0));
        let bd = compute_costs(&req, &RateTables::default()).unwrap();

        assert_close(bd.get(CostLine::Transport).unwrap(), 85.0);
        assert_close(bd.get(CostLine::Volumetric).unwrap(), 667.25);
        assert_close(bd.get(CostLine::Distance).unwrap(), 8.5);
        assert_close(bd.get(CostLine::Taxes).unwrap(), 76.075);
        assert_close(bd.total(), 836.825);
    }

    #[test]
    fn volumetric_line_omitted_when_not_heavier() {
        // 0.5 m³ * 167 = 83.5 kg, below the 100 kg actual weight
        let req = china_to_ecuador().with_dimensions(Dimensions::new(100.0, 100.0, 50.0));
        let bd = compute_costs(&req, &RateTables::default()).unwrap();
        assert!(!bd.contains(CostLine::Volumetric));
        assert!(bd.items().iter().all(|i| i.line != CostLine::Volumetric));
    }

    #[test]
    fn all_services_in_order() {
        let services = SelectedServices {
            insurance: true,
            tracking: true,
            packaging: true,
            customs: true,
        };
        let req = china_to_ecuador()
            .with_declared_value(5000.0)
            .with_dimensions(Dimensions::new(200.0, 100.0, 100.0))
            .with_services(services);
        let bd = compute_costs(&req, &RateTables::default()).unwrap();

        let lines: Vec<CostLine> = bd.items().iter().map(|i| i.line).collect();
        assert_eq!(
            lines,
            vec![
                CostLine::Transport,
                CostLine::Volumetric,
                CostLine::Distance,
                CostLine::Insurance,
                CostLine::Tracking,
                CostLine::Packaging,
                CostLine::Customs,
                CostLine::Taxes,
            ]
        );
        assert_close(bd.get(CostLine::Tracking).unwrap(), 25.0);
        assert_close(bd.get(CostLine::Packaging).unwrap(), 150.0);
        assert_close(bd.get(CostLine::Customs).unwrap(), 150.0);
        // volumetric: (334 - 100) * 2.5 * 0.5
        assert_close(bd.get(CostLine::Volumetric).unwrap(), 292.5);
    }

    #[test]
    fn total_is_sum_of_lines_and_taxes_are_ten_percent() {
        let req = QuoteRequest::new("japan", "ecuador", 37.3, TransportMode::Express)
            .with_cargo_type(CargoType::Fragile)
            .with_dimensions(Dimensions::new(80.0, 60.0, 45.0))
            .with_declared_value(1234.56)
            .with_services(SelectedServices {
                insurance: true,
                tracking: true,
                packaging: false,
                customs: true,
            });
        let bd = compute_costs(&req, &RateTables::default()).unwrap();

        let sum: f64 = bd.items().iter().map(|i| i.amount).sum();
        assert_eq!(bd.total(), sum);

        let taxes = bd.get(CostLine::Taxes).unwrap();
        assert_eq!(taxes, bd.subtotal() * 0.10);
        assert_close(taxes, 0.10 * (bd.total() - taxes));
    }

    #[test]
    fn deterministic() {
        let req = china_to_ecuador()
            .with_dimensions(Dimensions::new(120.0, 80.0, 90.0))
            .with_cargo_type(CargoType::Dangerous);
        let tables = RateTables::default();
        assert_eq!(
            compute_costs(&req, &tables).unwrap(),
            compute_costs(&req, &tables).unwrap()
        );
    }

    #[test]
    fn cargo_multiplier_applies_to_transport() {
        let req = china_to_ecuador().with_cargo_type(CargoType::Valuable);
        let bd = compute_costs(&req, &RateTables::default()).unwrap();
        assert_close(bd.get(CostLine::Transport).unwrap(), 500.0);
        assert_close(bd.get(CostLine::Distance).unwrap(), 90.0);
    }

    #[test]
    fn cargo_type_without_multiplier_behaves_like_general() {
        let mut tables = RateTables::default();
        tables.cargo_multipliers.remove(&CargoType::Perishable);

        let general = compute_costs(&china_to_ecuador(), &tables).unwrap();
        let perishable = compute_costs(
            &china_to_ecuador().with_cargo_type(CargoType::Perishable),
            &tables,
        )
        .unwrap();
        assert_eq!(general, perishable);
    }

    #[test]
    fn unlisted_route_uses_unit_multiplier() {
        let req = QuoteRequest::new("usa", "chile", 100.0, TransportMode::Maritime);
        let bd = compute_costs(&req, &RateTables::default()).unwrap();
        assert_close(bd.get(CostLine::Distance).unwrap(), 25.0);
    }

    #[test]
    fn zero_weight_is_invalid() {
        let mut req = china_to_ecuador();
        req.weight_kg = 0.0;
        assert!(!validate(&req));
        assert_eq!(check(&req), Err(ValidationError::NonPositiveWeight(0.0)));
        assert!(quote(&req, &RateTables::default()).is_empty());
        assert_eq!(quote(&req, &RateTables::default()).total(), 0.0);
    }

    #[test]
    fn negative_weight_is_invalid() {
        let mut req = china_to_ecuador()
            .with_services(SelectedServices::none().with(AdditionalService::Packaging));
        req.weight_kg = -5.0;
        assert!(!validate(&req));
        assert_eq!(check(&req), Err(ValidationError::NonPositiveWeight(-5.0)));
        assert!(matches!(
            compute_costs(&req, &RateTables::default()),
            Err(DomainError::Validation(ValidationError::NonPositiveWeight(_)))
        ));
        let bd = quote(&req, &RateTables::default());
        assert!(bd.is_empty());
        assert_eq!(bd.total(), 0.0);
    }

    #[test]
    fn nan_weight_is_invalid() {
        let mut req = china_to_ecuador();
        req.weight_kg = f64::NAN;
        assert!(!validate(&req));
    }

    #[test]
    fn missing_transport_is_invalid() {
        let mut req = china_to_ecuador();
        req.transport_mode = None;
        assert_eq!(check(&req), Err(ValidationError::MissingTransportMode));
        assert!(matches!(
            compute_costs(&req, &RateTables::default()),
            Err(DomainError::Validation(ValidationError::MissingTransportMode))
        ));
        assert!(quote(&req, &RateTables::default()).is_empty());
    }

    #[test]
    fn missing_countries_are_invalid() {
        let mut req = china_to_ecuador();
        req.origin_country = None;
        assert_eq!(check(&req), Err(ValidationError::MissingOriginCountry));

        let mut req = china_to_ecuador();
        req.dest_country = Some(String::new());
        assert_eq!(check(&req), Err(ValidationError::MissingDestinationCountry));
    }

    #[test]
    fn missing_tariff_is_configuration_error() {
        let mut tables = RateTables::default();
        tables.base_tariffs.remove(&TransportMode::Maritime);

        let err = compute_costs(&china_to_ecuador(), &tables).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
        assert!(quote(&china_to_ecuador(), &tables).is_empty());
    }

    #[test]
    fn custom_tables_are_honoured() {
        let mut tables = RateTables::default();
        tables.tax_rate = 0.0;
        tables.distance_surcharge_rate = 0.0;
        let bd = compute_costs(&china_to_ecuador(), &tables).unwrap();
        assert_close(bd.get(CostLine::Distance).unwrap(), 0.0);
        assert_close(bd.get(CostLine::Taxes).unwrap(), 0.0);
        assert_close(bd.total(), 250.0);
    }
}
