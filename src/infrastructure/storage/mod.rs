//! Quote history storage

mod memory;

pub use memory::InMemoryQuoteStore;
