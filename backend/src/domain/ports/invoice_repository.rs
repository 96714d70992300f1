//! Persistence port for invoice records.

use async_trait::async_trait;

use crate::domain::{Invoice, InvoicePatch, NewInvoice};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by invoice repository adapters.
    pub enum InvoicePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "invoice repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "invoice repository query failed: {message}",
        /// The store rejected a duplicate invoice number.
        DuplicateInvoiceNumber { number: String } =>
            "invoice number already exists: {number}",
        /// The store rejected an unknown award reference.
        UnknownAward { message: String } => "invoice references an unknown award: {message}",
    }
}

/// Persistence port for the invoices collection.
///
/// Invoice-number uniqueness lives in the store; adapters surface violations
/// as [`InvoicePersistenceError::DuplicateInvoiceNumber`] so the service can
/// report a validation failure instead of a server error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// All invoices, newest first.
    async fn list(&self) -> Result<Vec<Invoice>, InvoicePersistenceError>;

    /// Insert a new invoice and return the fully populated row.
    async fn create(&self, new: &NewInvoice) -> Result<Invoice, InvoicePersistenceError>;

    /// Apply a partial update by identifier; `None` when no row matches.
    async fn update(
        &self,
        id: i32,
        patch: &InvoicePatch,
    ) -> Result<Option<Invoice>, InvoicePersistenceError>;

    /// Whether a row with this identifier exists.
    async fn exists(&self, id: i32) -> Result<bool, InvoicePersistenceError>;
}

/// In-memory invoice store used in fixture mode and by adapter-free tests.
#[derive(Debug, Default)]
pub struct FixtureInvoiceRepository {
    state: std::sync::Mutex<FixtureInvoiceState>,
}

#[derive(Debug, Default)]
struct FixtureInvoiceState {
    rows: Vec<Invoice>,
    next_id: i32,
}

impl FixtureInvoiceRepository {
    /// Empty fixture store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, FixtureInvoiceState>, InvoicePersistenceError> {
        self.state
            .lock()
            .map_err(|_| InvoicePersistenceError::query("fixture state poisoned"))
    }
}

#[async_trait]
impl InvoiceRepository for FixtureInvoiceRepository {
    async fn list(&self) -> Result<Vec<Invoice>, InvoicePersistenceError> {
        let state = self.lock()?;
        let mut rows = state.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn create(&self, new: &NewInvoice) -> Result<Invoice, InvoicePersistenceError> {
        let mut state = self.lock()?;
        if state
            .rows
            .iter()
            .any(|row| row.invoice_number == new.invoice_number())
        {
            return Err(InvoicePersistenceError::duplicate_invoice_number(
                new.invoice_number(),
            ));
        }
        state.next_id += 1;
        let now = chrono::Utc::now();
        let extras = new.extras();
        let invoice = Invoice {
            id: state.next_id,
            invoice_number: new.invoice_number().to_owned(),
            vendor_name: new.vendor_name().to_owned(),
            amount_cents: new.amount_cents(),
            status: new.status(),
            invoice_date: new.invoice_date(),
            due_date: extras.due_date,
            image_url: extras.image_url.clone(),
            notes: extras.notes.clone(),
            award_id: extras.award_id,
            created_at: now,
            updated_at: now,
        };
        state.rows.push(invoice.clone());
        Ok(invoice)
    }

    async fn update(
        &self,
        id: i32,
        patch: &InvoicePatch,
    ) -> Result<Option<Invoice>, InvoicePersistenceError> {
        let mut state = self.lock()?;
        if let Some(number) = &patch.invoice_number
            && state
                .rows
                .iter()
                .any(|row| row.id != id && &row.invoice_number == number)
        {
            return Err(InvoicePersistenceError::duplicate_invoice_number(number));
        }
        let Some(row) = state.rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        if let Some(number) = &patch.invoice_number {
            row.invoice_number = number.clone();
        }
        if let Some(vendor) = &patch.vendor_name {
            row.vendor_name = vendor.clone();
        }
        if let Some(amount) = patch.amount_cents {
            row.amount_cents = amount;
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        if let Some(date) = patch.invoice_date {
            row.invoice_date = date;
        }
        if let Some(due) = patch.due_date {
            row.due_date = due;
        }
        if let Some(image_url) = &patch.image_url {
            row.image_url = image_url.clone();
        }
        if let Some(notes) = &patch.notes {
            row.notes = notes.clone();
        }
        if let Some(award_id) = patch.award_id {
            row.award_id = award_id;
        }
        row.updated_at = chrono::Utc::now();
        Ok(Some(row.clone()))
    }

    async fn exists(&self, id: i32) -> Result<bool, InvoicePersistenceError> {
        let state = self.lock()?;
        Ok(state.rows.iter().any(|row| row.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewInvoiceExtras;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn new_invoice(number: &str) -> NewInvoice {
        let date = NaiveDate::from_ymd_opt(2026, 2, 14).expect("valid date");
        NewInvoice::try_new(
            number,
            "Crown Trophies",
            12345,
            date,
            NewInvoiceExtras::default(),
        )
        .expect("valid payload")
    }

    #[rstest]
    #[tokio::test]
    async fn amounts_round_trip_as_exact_integers() {
        let repo = FixtureInvoiceRepository::new();
        let created = repo.create(&new_invoice("INV-1")).await.expect("create");
        assert_eq!(created.amount_cents, 12345);

        let listed = repo.list().await.expect("list");
        assert_eq!(listed[0].amount_cents, 12345);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_invoice_numbers_are_rejected() {
        let repo = FixtureInvoiceRepository::new();
        repo.create(&new_invoice("INV-1")).await.expect("first");

        let err = repo
            .create(&new_invoice("INV-1"))
            .await
            .expect_err("duplicate");
        assert_eq!(
            err,
            InvoicePersistenceError::duplicate_invoice_number("INV-1")
        );

        // Only the first row survives.
        assert_eq!(repo.list().await.expect("list").len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn status_update_leaves_invoice_number_untouched() {
        let repo = FixtureInvoiceRepository::new();
        let created = repo.create(&new_invoice("INV-7")).await.expect("create");

        let patch = InvoicePatch {
            status: Some(crate::domain::RecordStatus::Approved),
            ..InvoicePatch::default()
        };
        let updated = repo
            .update(created.id, &patch)
            .await
            .expect("update")
            .expect("row exists");

        assert_eq!(updated.status, crate::domain::RecordStatus::Approved);
        assert_eq!(updated.invoice_number, "INV-7");
        assert!(updated.updated_at > created.updated_at);
    }

    #[rstest]
    #[tokio::test]
    async fn renumbering_to_a_taken_number_is_rejected() {
        let repo = FixtureInvoiceRepository::new();
        repo.create(&new_invoice("INV-1")).await.expect("first");
        let second = repo.create(&new_invoice("INV-2")).await.expect("second");

        let patch = InvoicePatch {
            invoice_number: Some("INV-1".to_owned()),
            ..InvoicePatch::default()
        };
        let err = repo.update(second.id, &patch).await.expect_err("duplicate");
        assert_eq!(
            err,
            InvoicePersistenceError::duplicate_invoice_number("INV-1")
        );
    }
}
