//! Quote service: pricing, saving and managing shipment quotes

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};
use log::{info, warn};
use rand::Rng;

use crate::domain::quote;
use crate::domain::{
    CostBreakdown, DomainError, DomainResult, QuoteAction, QuoteFilter, QuoteId, QuoteRecord,
    QuoteRepository, QuoteRequest, RateTables, ValidationError,
};

/// Attempts at drawing a free quote number before giving up.
const MAX_ID_ATTEMPTS: usize = 16;

/// Service for quote operations
pub struct QuoteService {
    tables: Arc<RateTables>,
    quotes: Arc<dyn QuoteRepository>,
}

impl QuoteService {
    pub fn new(tables: Arc<RateTables>, quotes: Arc<dyn QuoteRepository>) -> Self {
        Self { tables, quotes }
    }

    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    /// Live calculation for the quote form.
    ///
    /// Incomplete requests yield an empty breakdown; the UI shows the
    /// "complete the form" placeholder instead of a total.
    pub fn calculate(&self, request: &QuoteRequest) -> CostBreakdown {
        quote::quote(request, &self.tables)
    }

    /// Price a request and store it as a pending quote.
    pub fn save_quote<R: Rng + ?Sized>(
        &self,
        request: &QuoteRequest,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> DomainResult<QuoteRecord> {
        let breakdown = quote::compute_costs(request, &self.tables).map_err(|e| {
            if !e.is_user_error() {
                warn!("Quote could not be priced: {}", e);
            }
            e
        })?;

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = QuoteId::generate(now.year(), rng);
            let record = QuoteRecord::issue(id, request, breakdown.total(), now)
                .ok_or(ValidationError::MissingTransportMode)?;

            match self.quotes.save(record) {
                Ok(saved) => {
                    info!(
                        "Quote {} saved: {} {} -> {} ({})",
                        saved.id,
                        breakdown.format_total(),
                        saved.origin_country,
                        saved.dest_country,
                        saved.transport_mode
                    );
                    return Ok(saved);
                }
                Err(DomainError::Conflict(_)) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(DomainError::Conflict(format!(
            "no free quote number for {} after {} attempts",
            now.year(),
            MAX_ID_ATTEMPTS
        )))
    }

    /// Get a saved quote by id
    pub fn get_quote(&self, id: &QuoteId) -> DomainResult<QuoteRecord> {
        self.quotes.find_by_id(id)?.ok_or_else(|| DomainError::NotFound {
            entity: "quote",
            field: "id",
            value: id.to_string(),
        })
    }

    /// Apply a user action (approve, renew, archive, ...) to a saved quote.
    pub fn apply_action(
        &self,
        id: &QuoteId,
        action: QuoteAction,
        now: DateTime<Utc>,
    ) -> DomainResult<QuoteRecord> {
        let mut record = self.get_quote(id)?;
        let previous = record.status;
        let status = record.apply(action, now)?;
        self.quotes.update(record.clone())?;

        if status != previous {
            info!("Quote {} {}: {} -> {}", id, action, previous, status);
        }
        Ok(record)
    }

    /// Saved quotes matching the filter, newest first.
    pub fn list_quotes(
        &self,
        filter: &QuoteFilter,
        now: DateTime<Utc>,
    ) -> DomainResult<Vec<QuoteRecord>> {
        let mut quotes: Vec<QuoteRecord> = self
            .quotes
            .find_all()?
            .into_iter()
            .filter(|q| filter.matches(q, now))
            .collect();
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(quotes)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{QuotePeriod, QuoteStatus, TransportMode};
    use crate::infrastructure::storage::InMemoryQuoteStore;
    use chrono::{Duration, TimeZone};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    fn service() -> QuoteService {
        QuoteService::new(
            Arc::new(RateTables::default()),
            Arc::new(InMemoryQuoteStore::new()),
        )
    }

    fn request() -> QuoteRequest {
        QuoteRequest::new("china", "ecuador", 100.0, TransportMode::Maritime)
    }

    #[test]
    fn calculate_returns_empty_for_incomplete_request() {
        let svc = service();
        let mut req = request();
        req.transport_mode = None;
        assert!(svc.calculate(&req).is_empty());
        assert!((svc.calculate(&request()).total() - 324.5).abs() < 1e-9);
    }

    #[test]
    fn save_quote_stores_pending_record() {
        let svc = service();
        let mut rng = StdRng::seed_from_u64(1);
        let saved = svc.save_quote(&request(), now(), &mut rng).unwrap();

        assert!(saved.id.as_str().starts_with("COT-2024-"));
        assert_eq!(saved.status, QuoteStatus::Pending);
        assert!((saved.total - 324.5).abs() < 1e-9);
        assert_eq!(svc.get_quote(&saved.id).unwrap(), saved);
    }

    #[test]
    fn save_quote_rejects_incomplete_request() {
        let svc = service();
        let mut req = request();
        req.weight_kg = 0.0;
        let err = svc
            .save_quote(&req, now(), &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn save_quote_surfaces_configuration_errors() {
        let mut tables = RateTables::default();
        tables.base_tariffs.clear();
        let svc = QuoteService::new(Arc::new(tables), Arc::new(InMemoryQuoteStore::new()));
        let err = svc
            .save_quote(&request(), now(), &mut StdRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn many_quotes_get_distinct_ids() {
        let svc = service();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            svc.save_quote(&request(), now(), &mut rng).unwrap();
        }
        let all = svc.list_quotes(&QuoteFilter::default(), now()).unwrap();
        assert_eq!(all.len(), 20);
    }

    #[test]
    fn apply_action_persists_status() {
        let svc = service();
        let saved = svc
            .save_quote(&request(), now(), &mut StdRng::seed_from_u64(3))
            .unwrap();

        let approved = svc.apply_action(&saved.id, QuoteAction::Approve, now()).unwrap();
        assert_eq!(approved.status, QuoteStatus::Approved);
        assert_eq!(svc.get_quote(&saved.id).unwrap().status, QuoteStatus::Approved);

        let err = svc
            .apply_action(&saved.id, QuoteAction::Renew, now())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn apply_action_on_unknown_quote() {
        let svc = service();
        let id: QuoteId = "COT-2024-404".parse().unwrap();
        assert!(matches!(
            svc.apply_action(&id, QuoteAction::View, now()),
            Err(DomainError::NotFound { .. })
        ));
    }

    #[test]
    fn list_quotes_filters_and_sorts_newest_first() {
        let svc = service();
        let mut rng = StdRng::seed_from_u64(9);
        let old = svc
            .save_quote(&request(), now() - Duration::days(20), &mut rng)
            .unwrap();
        let new = svc.save_quote(&request(), now(), &mut rng).unwrap();
        svc.apply_action(&old.id, QuoteAction::Reject, now()).unwrap();

        let all = svc.list_quotes(&QuoteFilter::default(), now()).unwrap();
        assert_eq!(all[0].id, new.id);
        assert_eq!(all[1].id, old.id);

        let week = QuoteFilter {
            status: None,
            period: QuotePeriod::Week,
        };
        let recent = svc.list_quotes(&week, now()).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, new.id);

        let rejected = QuoteFilter {
            status: Some(QuoteStatus::Rejected),
            period: QuotePeriod::All,
        };
        let rejected = svc.list_quotes(&rejected, now()).unwrap();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].id, old.id);
    }
}
