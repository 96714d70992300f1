//! Invoices record service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::ports::{InvoicePersistenceError, InvoiceRepository};
use crate::domain::{Error, Invoice, InvoicePatch, NewInvoice};

/// Service wrapping an [`InvoiceRepository`] with the mutation contract.
///
/// Uniqueness of the invoice number belongs to the store; this service only
/// translates the store's verdict into a field-level validation error.
pub struct InvoicesService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> Clone for InvoicesService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: ?Sized> InvoicesService<R> {
    /// Create a new service over the given repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_persistence_error(error: InvoicePersistenceError) -> Error {
    match error {
        InvoicePersistenceError::Connection { message } => {
            Error::unavailable(format!("invoice store unavailable: {message}"))
        }
        InvoicePersistenceError::Query { message } => {
            Error::internal(format!("invoice store error: {message}"))
        }
        InvoicePersistenceError::DuplicateInvoiceNumber { number } => {
            Error::invalid_request(format!("invoice number already exists: {number}"))
                .with_details(json!({
                    "field": "invoiceNumber",
                    "code": "duplicate_invoice_number",
                }))
        }
        InvoicePersistenceError::UnknownAward { message } => {
            Error::invalid_request(format!("unknown award reference: {message}")).with_details(
                json!({
                    "field": "awardId",
                    "code": "unknown_award",
                }),
            )
        }
    }
}

impl<R> InvoicesService<R>
where
    R: InvoiceRepository + ?Sized,
{
    /// All invoices, newest first.
    pub async fn list(&self) -> Result<Vec<Invoice>, Error> {
        self.repo.list().await.map_err(map_persistence_error)
    }

    /// Insert a validated invoice and return the stored row.
    pub async fn create(&self, new: NewInvoice) -> Result<Invoice, Error> {
        self.repo.create(&new).await.map_err(map_persistence_error)
    }

    /// Apply a partial update by identifier.
    pub async fn update(&self, id: i32, patch: InvoicePatch) -> Result<Invoice, Error> {
        if patch.is_empty() {
            return Err(Error::invalid_request(
                "update must include at least one field",
            )
            .with_details(json!({ "code": "empty_patch" })));
        }
        self.repo
            .update(id, &patch)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("no invoice with id {id}")))
    }

    /// Whether an invoice row exists; used for referential probes.
    pub async fn exists(&self, id: i32) -> Result<bool, Error> {
        self.repo.exists(id).await.map_err(map_persistence_error)
    }
}

#[cfg(test)]
#[path = "invoices_service_tests.rs"]
mod tests;
