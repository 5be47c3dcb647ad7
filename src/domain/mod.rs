pub mod error;
pub mod geography;
pub mod quote;
pub mod rates;
pub mod shipment;

// Re-export commonly used types
pub use error::{DomainError, DomainResult, ValidationError};
pub use geography::{city_slug, CityCatalog, Country};
pub use quote::{
    CostBreakdown, CostItem, CostLine, QuoteAction, QuoteFilter, QuoteId, QuotePeriod,
    QuoteRecord, QuoteRepository, QuoteRequest, QuoteStatus,
};
pub use rates::{RateTables, RouteKey, ServiceRates};
pub use shipment::{AdditionalService, CargoType, Dimensions, SelectedServices, TransportMode};
