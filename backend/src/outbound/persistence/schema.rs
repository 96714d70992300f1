//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change, update this file to match (or
//! regenerate it with `diesel print-schema`).

diesel::table! {
    /// Awards inventory.
    ///
    /// Lifecycle status is stored as text and constrained by a CHECK.
    awards (id) {
        /// Primary key, store-assigned.
        id -> Int4,
        /// Display name, never empty.
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Lifecycle status (planned/ordered/approved/delivered/received).
        status -> Varchar,
        /// Units on hand or on order, never negative.
        quantity -> Int4,
        /// Optional URL of an uploaded product image.
        image_url -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Vendor invoices.
    ///
    /// `invoice_number` carries a UNIQUE constraint; `award_id` is a
    /// nullable foreign key into `awards`.
    invoices (id) {
        /// Primary key, store-assigned.
        id -> Int4,
        /// Caller-supplied invoice number, unique.
        invoice_number -> Varchar,
        /// Vendor name, never empty.
        vendor_name -> Varchar,
        /// Amount in minor currency units, never negative.
        amount_cents -> Int8,
        /// Payment status (same vocabulary as awards).
        status -> Varchar,
        /// Date printed on the invoice.
        invoice_date -> Date,
        /// Optional payment due date.
        due_date -> Nullable<Date>,
        /// Optional URL of the scanned invoice image.
        image_url -> Nullable<Text>,
        /// Optional free-text notes.
        notes -> Nullable<Text>,
        /// Optional reference to the award this invoice pays for.
        award_id -> Nullable<Int4>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Uploaded document metadata.
    ///
    /// Rows attach to awards or invoices through the (entity_kind,
    /// entity_id) pair; referential checks happen in the service layer.
    documents (id) {
        /// Primary key, store-assigned.
        id -> Int4,
        /// Original file name.
        file_name -> Varchar,
        /// URL returned by the file-hosting collaborator.
        file_url -> Text,
        /// MIME-like content type.
        file_type -> Varchar,
        /// File size in bytes, always positive.
        file_size -> Int8,
        /// Collection the document attaches to ("award" or "invoice").
        entity_kind -> Varchar,
        /// Identifier of the referenced row in that collection.
        entity_id -> Int4,
        /// Upload instant.
        uploaded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Sports reference data (read-only; seeded, never mutated here).
    sports (id) {
        id -> Int4,
        name -> Varchar,
        abbreviation -> Varchar,
        season -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Conference reference data (read-only).
    conferences (id) {
        id -> Int4,
        name -> Varchar,
        abbreviation -> Varchar,
    }
}

diesel::table! {
    /// Policy documents reference data (read-only).
    policies (id) {
        id -> Int4,
        title -> Varchar,
        category -> Varchar,
        content -> Text,
        sport_id -> Nullable<Int4>,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(policies -> sports (sport_id));

diesel::allow_tables_to_appear_in_same_query!(awards, invoices, documents);
diesel::allow_tables_to_appear_in_same_query!(sports, conferences, policies);
