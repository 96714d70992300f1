//! PostgreSQL-backed `InvoiceRepository` implementation using Diesel ORM.
//!
//! Invoice-number uniqueness and the award foreign key are enforced by the
//! database; this adapter decodes the constraint violations back into the
//! dedicated port variants so the service can report validation failures
//! instead of server errors.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{InvoicePersistenceError, InvoiceRepository};
use crate::domain::{Invoice, InvoicePatch, NewInvoice};

use super::diesel_helpers::{decode_status, map_basic_diesel_error, map_basic_pool_error};
use super::models::{InvoiceChangeset, InvoiceRow, NewInvoiceRow};
use super::pool::{DbPool, PoolError};
use super::schema::invoices;

/// Diesel-backed implementation of the `InvoiceRepository` port.
#[derive(Clone)]
pub struct DieselInvoiceRepository {
    pool: DbPool,
}

impl DieselInvoiceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> InvoicePersistenceError {
    map_basic_pool_error(error, InvoicePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> InvoicePersistenceError {
    map_basic_diesel_error(
        error,
        InvoicePersistenceError::query,
        InvoicePersistenceError::connection,
    )
}

/// Map mutation errors, intercepting the two constraint violations that
/// carry dedicated port variants. `number` is the invoice number the
/// statement attempted to write.
fn map_write_error(error: diesel::result::Error, number: &str) -> InvoicePersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(
                constraint = info.constraint_name(),
                "unique violation on invoice write"
            );
            InvoicePersistenceError::duplicate_invoice_number(number)
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            debug!(
                constraint = info.constraint_name(),
                "foreign key violation on invoice write"
            );
            InvoicePersistenceError::unknown_award(info.message().to_owned())
        }
        _ => map_diesel_error(error),
    }
}

/// Convert a database row to a domain invoice.
fn row_to_invoice(row: InvoiceRow) -> Invoice {
    Invoice {
        id: row.id,
        invoice_number: row.invoice_number,
        vendor_name: row.vendor_name,
        amount_cents: row.amount_cents,
        status: decode_status(&row.status, "invoices", row.id),
        invoice_date: row.invoice_date,
        due_date: row.due_date,
        image_url: row.image_url,
        notes: row.notes,
        award_id: row.award_id,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn patch_to_changeset(patch: &InvoicePatch) -> InvoiceChangeset<'_> {
    InvoiceChangeset {
        invoice_number: patch.invoice_number.as_deref(),
        vendor_name: patch.vendor_name.as_deref(),
        amount_cents: patch.amount_cents,
        status: patch.status.map(|status| status.as_str()),
        invoice_date: patch.invoice_date,
        due_date: patch.due_date,
        image_url: patch.image_url.as_ref().map(Option::as_deref),
        notes: patch.notes.as_ref().map(Option::as_deref),
        award_id: patch.award_id,
    }
}

#[async_trait]
impl InvoiceRepository for DieselInvoiceRepository {
    async fn list(&self) -> Result<Vec<Invoice>, InvoicePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<InvoiceRow> = invoices::table
            .order((invoices::created_at.desc(), invoices::id.desc()))
            .select(InvoiceRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_invoice).collect())
    }

    async fn create(&self, new: &NewInvoice) -> Result<Invoice, InvoicePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let extras = new.extras();
        let new_row = NewInvoiceRow {
            invoice_number: new.invoice_number(),
            vendor_name: new.vendor_name(),
            amount_cents: new.amount_cents(),
            status: new.status().as_str(),
            invoice_date: new.invoice_date(),
            due_date: extras.due_date,
            image_url: extras.image_url.as_deref(),
            notes: extras.notes.as_deref(),
            award_id: extras.award_id,
        };

        let row: InvoiceRow = diesel::insert_into(invoices::table)
            .values(&new_row)
            .returning(InvoiceRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| map_write_error(error, new.invoice_number()))?;

        Ok(row_to_invoice(row))
    }

    async fn update(
        &self,
        id: i32,
        patch: &InvoicePatch,
    ) -> Result<Option<Invoice>, InvoicePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // A unique violation here can only come from a renumbering patch.
        let attempted_number = patch.invoice_number.as_deref().unwrap_or_default();
        let row: Option<InvoiceRow> = diesel::update(invoices::table.filter(invoices::id.eq(id)))
            .set((
                patch_to_changeset(patch),
                invoices::updated_at.eq(diesel::dsl::now),
            ))
            .returning(InvoiceRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|error| map_write_error(error, attempted_number))?;

        Ok(row.map(row_to_invoice))
    }

    async fn exists(&self, id: i32) -> Result<bool, InvoicePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            invoices::table.filter(invoices::id.eq(id)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::RecordStatus;

    fn sample_row() -> InvoiceRow {
        InvoiceRow {
            id: 3,
            invoice_number: "INV-2025-014".into(),
            vendor_name: "Crown Trophy".into(),
            amount_cents: 12345,
            status: "approved".into(),
            invoice_date: NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
            due_date: None,
            image_url: None,
            notes: None,
            award_id: Some(7),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_conversion_preserves_amount_and_status() {
        let invoice = row_to_invoice(sample_row());
        assert_eq!(invoice.amount_cents, 12345);
        assert_eq!(invoice.status, RecordStatus::Approved);
        assert_eq!(invoice.award_id, Some(7));
    }

    #[rstest]
    fn unique_violation_maps_to_duplicate_number() {
        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key value".to_owned()),
        );
        let mapped = map_write_error(error, "INV-2025-014");
        assert_eq!(
            mapped,
            InvoicePersistenceError::duplicate_invoice_number("INV-2025-014")
        );
    }

    #[rstest]
    fn foreign_key_violation_maps_to_unknown_award() {
        let error = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            Box::new("violates foreign key constraint".to_owned()),
        );
        assert!(matches!(
            map_write_error(error, "INV-2025-014"),
            InvoicePersistenceError::UnknownAward { .. }
        ));
    }

    #[rstest]
    fn changeset_skips_absent_fields() {
        let patch = InvoicePatch {
            status: Some(RecordStatus::Received),
            ..InvoicePatch::default()
        };
        let changeset = patch_to_changeset(&patch);
        assert_eq!(changeset.status, Some("received"));
        assert_eq!(changeset.invoice_number, None);
        assert_eq!(changeset.award_id, None);
    }
}
