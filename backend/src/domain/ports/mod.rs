//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the record store, the hosted suggestion model). Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants instead of returning `anyhow::Result`.

mod award_repository;
mod document_repository;
mod invoice_repository;
pub(crate) mod macros;
mod suggestion_source;

#[cfg(test)]
pub use award_repository::MockAwardRepository;
pub use award_repository::{AwardPersistenceError, AwardRepository, FixtureAwardRepository};
#[cfg(test)]
pub use document_repository::MockDocumentRepository;
pub use document_repository::{
    DocumentPersistenceError, DocumentRepository, FixtureDocumentRepository,
};
#[cfg(test)]
pub use invoice_repository::MockInvoiceRepository;
pub use invoice_repository::{
    FixtureInvoiceRepository, InvoicePersistenceError, InvoiceRepository,
};
#[cfg(test)]
pub use suggestion_source::MockSuggestionSource;
pub use suggestion_source::{FixtureSuggestionSource, SuggestionSource, SuggestionSourceError};
