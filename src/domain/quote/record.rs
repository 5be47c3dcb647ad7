//! Saved quotes and their lifecycle

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::model::QuoteRequest;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::shipment::{CargoType, TransportMode};

/// How long a quote stays valid after it is issued or renewed.
pub const QUOTE_VALIDITY_DAYS: i64 = 30;

/// Quote number in the `COT-<year>-<NNN>` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(String);

impl QuoteId {
    pub fn generate<R: Rng + ?Sized>(year: i32, rng: &mut R) -> Self {
        let number: u16 = rng.gen_range(0..1000);
        Self(format!("COT-{}-{:03}", year, number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for QuoteId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut parts = s.splitn(3, '-');
        let well_formed = match (parts.next(), parts.next(), parts.next()) {
            (Some("COT"), Some(year), Some(number)) => {
                year.len() == 4
                    && year.chars().all(|c| c.is_ascii_digit())
                    && number.len() == 3
                    && number.chars().all(|c| c.is_ascii_digit())
            }
            _ => false,
        };
        if !well_formed {
            return Err(format!("malformed quote id '{}'", s));
        }
        Ok(Self(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Expired,
    Archived,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "expired" => Ok(Self::Expired),
            "archived" => Ok(Self::Archived),
            other => Err(format!("unknown quote status '{}'", other)),
        }
    }
}

/// Everything a user can do with a saved quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteAction {
    View,
    Edit,
    SendEmail,
    CreateShipment,
    GenerateInvoice,
    Renew,
    Archive,
    Approve,
    Reject,
    Expire,
}

impl QuoteAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::SendEmail => "send_email",
            Self::CreateShipment => "create_shipment",
            Self::GenerateInvoice => "generate_invoice",
            Self::Renew => "renew",
            Self::Archive => "archive",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Expire => "expire",
        }
    }
}

impl fmt::Display for QuoteAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A quote that has been saved to the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: QuoteId,
    pub origin_country: String,
    pub origin_city: Option<String>,
    pub dest_country: String,
    pub dest_city: Option<String>,
    pub transport_mode: TransportMode,
    pub cargo_type: CargoType,
    pub weight_kg: f64,
    /// USD, unrounded
    pub total: f64,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
}

impl QuoteRecord {
    /// Issue a new pending quote for a priced request.
    ///
    /// Returns `None` when the request lacks a transport mode or countries.
    pub fn issue(
        id: QuoteId,
        request: &QuoteRequest,
        total: f64,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        Some(Self {
            id,
            origin_country: request.origin()?.to_string(),
            origin_city: request.origin_city.clone(),
            dest_country: request.destination()?.to_string(),
            dest_city: request.dest_city.clone(),
            transport_mode: request.transport_mode?,
            cargo_type: request.cargo_type,
            weight_kg: request.weight_kg,
            total,
            status: QuoteStatus::Pending,
            created_at: now,
            valid_until: now + Duration::days(QUOTE_VALIDITY_DAYS),
        })
    }

    /// Apply a user action, returning the resulting status.
    pub fn apply(&mut self, action: QuoteAction, now: DateTime<Utc>) -> DomainResult<QuoteStatus> {
        use QuoteAction as A;
        use QuoteStatus as S;

        let next = match (action, self.status) {
            (A::View | A::SendEmail, status) if status != S::Archived => status,
            (A::Edit, S::Pending) => S::Pending,
            (A::Approve, S::Pending) => S::Approved,
            (A::Reject, S::Pending) => S::Rejected,
            (A::Expire, S::Pending) => S::Expired,
            (A::CreateShipment | A::GenerateInvoice, S::Approved) => S::Approved,
            (A::Renew, S::Expired | S::Rejected) => {
                self.valid_until = now + Duration::days(QUOTE_VALIDITY_DAYS);
                S::Pending
            }
            (A::Archive, status) if status != S::Archived => S::Archived,
            (action, from) => {
                return Err(DomainError::InvalidTransition {
                    from: from.to_string(),
                    action: action.to_string(),
                })
            }
        };

        self.status = next;
        Ok(next)
    }
}

/// Creation-date window for the history view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuotePeriod {
    #[default]
    All,
    Week,
    Month,
    Quarter,
    Year,
}

impl QuotePeriod {
    pub fn window(&self) -> Option<Duration> {
        match self {
            Self::All => None,
            Self::Week => Some(Duration::days(7)),
            Self::Month => Some(Duration::days(30)),
            Self::Quarter => Some(Duration::days(90)),
            Self::Year => Some(Duration::days(365)),
        }
    }
}

impl FromStr for QuotePeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            other => Err(format!("unknown period '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteFilter {
    pub status: Option<QuoteStatus>,
    pub period: QuotePeriod,
}

impl QuoteFilter {
    pub fn matches(&self, record: &QuoteRecord, now: DateTime<Utc>) -> bool {
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        match self.period.window() {
            Some(window) => record.created_at >= now - window,
            None => true,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
