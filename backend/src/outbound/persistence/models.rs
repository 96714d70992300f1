//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{awards, documents, invoices};

// ---------------------------------------------------------------------------
// Award models
// ---------------------------------------------------------------------------

/// Row struct for reading from the awards table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = awards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AwardRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub quantity: i32,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new award records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = awards)]
pub(crate) struct NewAwardRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub status: &'a str,
    pub quantity: i32,
    pub image_url: Option<&'a str>,
}

/// Changeset struct for partial award updates.
///
/// Outer `None` skips the column; `Some(None)` writes SQL NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = awards)]
pub(crate) struct AwardChangeset<'a> {
    pub name: Option<&'a str>,
    pub description: Option<Option<&'a str>>,
    pub status: Option<&'a str>,
    pub quantity: Option<i32>,
    pub image_url: Option<Option<&'a str>>,
}

// ---------------------------------------------------------------------------
// Invoice models
// ---------------------------------------------------------------------------

/// Row struct for reading from the invoices table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = invoices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct InvoiceRow {
    pub id: i32,
    pub invoice_number: String,
    pub vendor_name: String,
    pub amount_cents: i64,
    pub status: String,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub award_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new invoice records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = invoices)]
pub(crate) struct NewInvoiceRow<'a> {
    pub invoice_number: &'a str,
    pub vendor_name: &'a str,
    pub amount_cents: i64,
    pub status: &'a str,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub image_url: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub award_id: Option<i32>,
}

/// Changeset struct for partial invoice updates.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = invoices)]
pub(crate) struct InvoiceChangeset<'a> {
    pub invoice_number: Option<&'a str>,
    pub vendor_name: Option<&'a str>,
    pub amount_cents: Option<i64>,
    pub status: Option<&'a str>,
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<Option<NaiveDate>>,
    pub image_url: Option<Option<&'a str>>,
    pub notes: Option<Option<&'a str>>,
    pub award_id: Option<Option<i32>>,
}

// ---------------------------------------------------------------------------
// Document models
// ---------------------------------------------------------------------------

/// Row struct for reading from the documents table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DocumentRow {
    pub id: i32,
    pub file_name: String,
    pub file_url: String,
    pub file_type: String,
    pub file_size: i64,
    pub entity_kind: String,
    pub entity_id: i32,
    pub uploaded_at: DateTime<Utc>,
}

/// Insertable struct for recording completed uploads.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
pub(crate) struct NewDocumentRow<'a> {
    pub file_name: &'a str,
    pub file_url: &'a str,
    pub file_type: &'a str,
    pub file_size: i64,
    pub entity_kind: &'a str,
    pub entity_id: i32,
}
