//! Rate tables aggregate
//!
//! Base tariffs, cargo multipliers, service prices and route multipliers.

pub mod model;

pub use model::{RateTables, RouteKey, ServiceRates, DEFAULT_VOLUMETRIC_FACTOR};
