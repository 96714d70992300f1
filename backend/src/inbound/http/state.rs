//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AwardRepository, DocumentRepository, FixtureAwardRepository, FixtureDocumentRepository,
    FixtureInvoiceRepository, FixtureSuggestionSource, InvoiceRepository, SuggestionSource,
};
use crate::domain::{AwardsService, DocumentsService, InvoicesService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub awards: Arc<dyn AwardRepository>,
    pub invoices: Arc<dyn InvoiceRepository>,
    pub documents: Arc<dyn DocumentRepository>,
    pub suggestions: Arc<dyn SuggestionSource>,
}

impl Default for HttpStatePorts {
    fn default() -> Self {
        Self {
            awards: Arc::new(FixtureAwardRepository::default()),
            invoices: Arc::new(FixtureInvoiceRepository::default()),
            documents: Arc::new(FixtureDocumentRepository::default()),
            suggestions: Arc::new(FixtureSuggestionSource),
        }
    }
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub awards: AwardsService<dyn AwardRepository>,
    pub invoices: InvoicesService<dyn InvoiceRepository>,
    pub documents:
        DocumentsService<dyn DocumentRepository, dyn AwardRepository, dyn InvoiceRepository>,
    pub suggestions: Arc<dyn SuggestionSource>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        let awards = AwardsService::new(ports.awards);
        let invoices = InvoicesService::new(ports.invoices);
        let documents =
            DocumentsService::new(ports.documents, awards.clone(), invoices.clone());
        Self {
            awards,
            invoices,
            documents,
            suggestions: ports.suggestions,
        }
    }
}
