//! Shipment vocabulary
//!
//! Transport modes, cargo types, package dimensions and additional services.

pub mod model;

pub use model::{AdditionalService, CargoType, Dimensions, SelectedServices, TransportMode};
