//! Quote history repository interface

use super::record::{QuoteId, QuoteRecord};
use crate::domain::DomainResult;

pub trait QuoteRepository: Send + Sync {
    fn find_by_id(&self, id: &QuoteId) -> DomainResult<Option<QuoteRecord>>;
    fn find_all(&self) -> DomainResult<Vec<QuoteRecord>>;
    /// Fails with `Conflict` when a quote with the same id already exists.
    fn save(&self, record: QuoteRecord) -> DomainResult<QuoteRecord>;
    /// Fails with `NotFound` when the quote does not exist.
    fn update(&self, record: QuoteRecord) -> DomainResult<()>;
}
