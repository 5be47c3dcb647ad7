//! # GlobalTrade freight quotes
//!
//! Shipping quote cost calculator for the GlobalTrade logistics dashboard.
//!
//! ## Architecture
//!
//! - **domain**: shipment vocabulary, rate tables, the quote calculator and
//!   saved quote records
//! - **application**: quote service, form input adapter and presentation
//! - **infrastructure**: in-memory quote history
//! - **config**: TOML configuration (logging and rate tables)
//! - **telemetry**: tracing subscriber setup
//!
//! ```
//! use freight_quote::domain::{quote, QuoteRequest, RateTables, TransportMode};
//!
//! let tables = RateTables::default();
//! let request = QuoteRequest::new("china", "ecuador", 100.0, TransportMode::Maritime);
//! let breakdown = quote::compute_costs(&request, &tables).unwrap();
//! assert_eq!(breakdown.format_total(), "$324.50");
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;

pub use application::services::QuoteService;
pub use config::{default_config_path, AppConfig};
pub use domain::{CostBreakdown, DomainError, DomainResult, QuoteRequest, RateTables};
