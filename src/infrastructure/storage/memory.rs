//! In-memory quote history

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{DomainError, DomainResult, QuoteId, QuoteRecord, QuoteRepository};

/// Process-lifetime quote history. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryQuoteStore {
    quotes: DashMap<QuoteId, QuoteRecord>,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl QuoteRepository for InMemoryQuoteStore {
    fn find_by_id(&self, id: &QuoteId) -> DomainResult<Option<QuoteRecord>> {
        Ok(self.quotes.get(id).map(|r| r.value().clone()))
    }

    fn find_all(&self) -> DomainResult<Vec<QuoteRecord>> {
        Ok(self.quotes.iter().map(|r| r.value().clone()).collect())
    }

    fn save(&self, record: QuoteRecord) -> DomainResult<QuoteRecord> {
        match self.quotes.entry(record.id.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!("quote {}", record.id))),
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    fn update(&self, record: QuoteRecord) -> DomainResult<()> {
        match self.quotes.get_mut(&record.id) {
            Some(mut existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(DomainError::NotFound {
                entity: "quote",
                field: "id",
                value: record.id.to_string(),
            }),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
