//! Invoice entity and its mutation payloads.
//!
//! Amounts are integer minor currency units (cents). They are never floats
//! anywhere in the pipeline, so a stored `12345` reads back as exactly
//! `12345`.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::status::RecordStatus;

/// A persisted vendor invoice.
///
/// `invoice_number` is unique across all invoices; the record store enforces
/// the constraint and duplicate inserts surface as validation errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Store-assigned identifier.
    pub id: i32,
    /// Caller-supplied invoice number, unique.
    pub invoice_number: String,
    /// Vendor name, never empty.
    pub vendor_name: String,
    /// Amount in minor currency units (cents).
    pub amount_cents: i64,
    /// Payment status.
    pub status: RecordStatus,
    /// Date printed on the invoice.
    pub invoice_date: NaiveDate,
    /// Optional payment due date.
    pub due_date: Option<NaiveDate>,
    /// Optional URL of the scanned invoice image.
    pub image_url: Option<String>,
    /// Optional free-text notes.
    pub notes: Option<String>,
    /// Optional reference to the award this invoice pays for.
    pub award_id: Option<i32>,
    /// Creation instant, immutable.
    pub created_at: DateTime<Utc>,
    /// Instant of the most recent mutation.
    pub updated_at: DateTime<Utc>,
}

/// Validation errors raised when constructing invoice payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvoiceValidationError {
    EmptyInvoiceNumber,
    EmptyVendorName,
    NegativeAmount,
}

impl fmt::Display for InvoiceValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInvoiceNumber => write!(f, "invoice number must not be empty"),
            Self::EmptyVendorName => write!(f, "vendor name must not be empty"),
            Self::NegativeAmount => write!(f, "invoice amount must not be negative"),
        }
    }
}

impl std::error::Error for InvoiceValidationError {}

/// Optional attributes accepted alongside the required invoice fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewInvoiceExtras {
    /// Initial status; defaults to [`RecordStatus::Planned`].
    pub status: Option<RecordStatus>,
    /// Optional payment due date.
    pub due_date: Option<NaiveDate>,
    /// Optional scanned image URL.
    pub image_url: Option<String>,
    /// Optional free-text notes.
    pub notes: Option<String>,
    /// Optional award reference.
    pub award_id: Option<i32>,
}

/// Validated payload for creating an invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    invoice_number: String,
    vendor_name: String,
    amount_cents: i64,
    invoice_date: NaiveDate,
    extras: NewInvoiceExtras,
}

impl NewInvoice {
    /// Validate and construct a creation payload.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use heliix::domain::{NewInvoice, NewInvoiceExtras};
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 2, 14).expect("valid date");
    /// let invoice = NewInvoice::try_new(
    ///     "INV-1042",
    ///     "Crown Trophies",
    ///     12345,
    ///     date,
    ///     NewInvoiceExtras::default(),
    /// )
    /// .expect("valid payload");
    /// assert_eq!(invoice.amount_cents(), 12345);
    /// ```
    pub fn try_new(
        invoice_number: impl Into<String>,
        vendor_name: impl Into<String>,
        amount_cents: i64,
        invoice_date: NaiveDate,
        extras: NewInvoiceExtras,
    ) -> Result<Self, InvoiceValidationError> {
        let invoice_number = invoice_number.into();
        if invoice_number.trim().is_empty() {
            return Err(InvoiceValidationError::EmptyInvoiceNumber);
        }
        let vendor_name = vendor_name.into();
        if vendor_name.trim().is_empty() {
            return Err(InvoiceValidationError::EmptyVendorName);
        }
        if amount_cents < 0 {
            return Err(InvoiceValidationError::NegativeAmount);
        }
        Ok(Self {
            invoice_number,
            vendor_name,
            amount_cents,
            invoice_date,
            extras,
        })
    }

    /// Unique invoice number.
    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    /// Vendor name.
    pub fn vendor_name(&self) -> &str {
        &self.vendor_name
    }

    /// Amount in minor units.
    pub fn amount_cents(&self) -> i64 {
        self.amount_cents
    }

    /// Invoice date.
    pub fn invoice_date(&self) -> NaiveDate {
        self.invoice_date
    }

    /// Initial status.
    pub fn status(&self) -> RecordStatus {
        self.extras.status.unwrap_or_default()
    }

    /// Optional attributes.
    pub fn extras(&self) -> &NewInvoiceExtras {
        &self.extras
    }
}

/// Validated partial update for an invoice.
///
/// Identifier and `created_at` are never writable. `invoice_number` stays
/// mutable (the store re-checks uniqueness); an all-`None` patch is rejected
/// by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvoicePatch {
    /// Replacement invoice number.
    pub invoice_number: Option<String>,
    /// Replacement vendor name.
    pub vendor_name: Option<String>,
    /// Replacement amount in minor units.
    pub amount_cents: Option<i64>,
    /// Replacement status.
    pub status: Option<RecordStatus>,
    /// Replacement invoice date.
    pub invoice_date: Option<NaiveDate>,
    /// Replacement due date; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
    /// Replacement image URL; `Some(None)` clears it.
    pub image_url: Option<Option<String>>,
    /// Replacement notes; `Some(None)` clears them.
    pub notes: Option<Option<String>>,
    /// Replacement award reference; `Some(None)` clears it.
    pub award_id: Option<Option<i32>>,
}

impl InvoicePatch {
    /// True when no field is populated.
    pub fn is_empty(&self) -> bool {
        self.invoice_number.is_none()
            && self.vendor_name.is_none()
            && self.amount_cents.is_none()
            && self.status.is_none()
            && self.invoice_date.is_none()
            && self.due_date.is_none()
            && self.image_url.is_none()
            && self.notes.is_none()
            && self.award_id.is_none()
    }

    /// Validate field-level invariants shared with creation.
    pub fn validate(&self) -> Result<(), InvoiceValidationError> {
        if let Some(number) = &self.invoice_number
            && number.trim().is_empty()
        {
            return Err(InvoiceValidationError::EmptyInvoiceNumber);
        }
        if let Some(vendor) = &self.vendor_name
            && vendor.trim().is_empty()
        {
            return Err(InvoiceValidationError::EmptyVendorName);
        }
        if let Some(amount) = self.amount_cents
            && amount < 0
        {
            return Err(InvoiceValidationError::NegativeAmount);
        }
        Ok(())
    }
}
