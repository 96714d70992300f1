//! Documents record service.
//!
//! Documents attach to either collection through a (kind, id) pair, which no
//! single SQL foreign key can express. The service probes the named
//! collection before insert and rejects unknown identifiers as validation
//! failures. Awards and invoices are never deleted by this contract, so a
//! row disappearing between probe and insert is not a practical concern.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::{
    AwardRepository, DocumentPersistenceError, DocumentRepository, InvoiceRepository,
};
use crate::domain::{AwardsService, Document, EntityKind, Error, InvoicesService, NewDocument};

/// Service wrapping a [`DocumentRepository`] plus the referential probes.
pub struct DocumentsService<D: ?Sized, A: ?Sized, I: ?Sized> {
    repo: Arc<D>,
    awards: AwardsService<A>,
    invoices: InvoicesService<I>,
}

impl<D: ?Sized, A: ?Sized, I: ?Sized> Clone for DocumentsService<D, A, I> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            awards: self.awards.clone(),
            invoices: self.invoices.clone(),
        }
    }
}

impl<D: ?Sized, A: ?Sized, I: ?Sized> DocumentsService<D, A, I> {
    /// Create a new service over the document repository and the record
    /// services used for existence probes.
    pub fn new(repo: Arc<D>, awards: AwardsService<A>, invoices: InvoicesService<I>) -> Self {
        Self {
            repo,
            awards,
            invoices,
        }
    }
}

fn map_persistence_error(error: DocumentPersistenceError) -> Error {
    match error {
        DocumentPersistenceError::Connection { message } => {
            Error::unavailable(format!("document store unavailable: {message}"))
        }
        DocumentPersistenceError::Query { message } => {
            Error::internal(format!("document store error: {message}"))
        }
    }
}

impl<D, A, I> DocumentsService<D, A, I>
where
    D: DocumentRepository + ?Sized,
    A: AwardRepository + ?Sized,
    I: InvoiceRepository + ?Sized,
{
    /// Documents attached to one record, newest first.
    pub async fn list_for_entity(
        &self,
        kind: EntityKind,
        entity_id: i32,
    ) -> Result<Vec<Document>, Error> {
        self.repo
            .list_for_entity(kind, entity_id)
            .await
            .map_err(map_persistence_error)
    }

    /// Record a completed upload after verifying the referenced row exists.
    pub async fn create(&self, new: NewDocument) -> Result<Document, Error> {
        let exists = match new.entity_kind() {
            EntityKind::Award => self.awards.exists(new.entity_id()).await?,
            EntityKind::Invoice => self.invoices.exists(new.entity_id()).await?,
        };
        if !exists {
            return Err(Error::invalid_request(format!(
                "no {} with id {}",
                new.entity_kind(),
                new.entity_id()
            ))
            .with_details(json!({
                "field": "entityId",
                "code": "unknown_entity",
            })));
        }
        self.repo.create(&new).await.map_err(map_persistence_error)
    }
}

#[cfg(test)]
#[path = "documents_service_tests.rs"]
mod tests;
