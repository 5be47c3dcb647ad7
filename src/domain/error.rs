//! Domain errors

use thiserror::Error;

use crate::domain::shipment::TransportMode;

/// Why a quote request cannot be priced yet.
///
/// These are user-input defects: the caller re-prompts and shows the
/// "complete the form" placeholder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("weight must be greater than zero (got {0})")]
    NonPositiveWeight(f64),

    #[error("transport mode is required")]
    MissingTransportMode,

    #[error("origin country is required")]
    MissingOriginCountry,

    #[error("destination country is required")]
    MissingDestinationCountry,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Validation: {0}")]
    Validation(#[from] ValidationError),

    /// The rate tables cannot price the request (e.g. no base tariff for a mode).
    #[error("Configuration: {0}")]
    Configuration(String),

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Cannot {action} a quote that is {from}")]
    InvalidTransition { from: String, action: String },
}

impl DomainError {
    pub fn missing_tariff(mode: TransportMode) -> Self {
        Self::Configuration(format!("no base tariff configured for transport mode '{}'", mode))
    }

    /// Whether the error was caused by user input rather than by configuration
    /// or programming defects.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidTransition { .. })
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
