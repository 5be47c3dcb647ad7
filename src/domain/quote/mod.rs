//! Quote aggregate
//!
//! Contains the quote request, the cost calculator, the itemized breakdown
//! and saved quote records.

pub mod calculator;
pub mod model;
pub mod record;
pub mod repository;

pub use calculator::{check, compute_costs, quote, validate};
pub use model::{format_usd, CostBreakdown, CostItem, CostLine, QuoteRequest};
pub use repository::QuoteRepository;
pub use record::{
    QuoteAction, QuoteFilter, QuoteId, QuotePeriod, QuoteRecord, QuoteStatus, QUOTE_VALIDITY_DAYS,
};
