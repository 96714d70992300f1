//! Schema for AI-assisted suggestions.
//!
//! These types are the contract every suggestion source must produce. They
//! are advisory only: the caller decides whether to feed a suggestion back
//! through the normal create/update contract as if a person had typed it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category suggestion for an award description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwardCategorySuggestion {
    /// Primary category, e.g. "trophy".
    pub category: String,
    /// Optional finer-grained subcategory.
    pub subcategory: Option<String>,
    /// Free-form tags for search and grouping.
    pub tags: Vec<String>,
    /// Model confidence in the range 0.0 to 1.0.
    pub confidence: f32,
}

/// One line item extracted from invoice text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    /// Line description.
    pub description: String,
    /// Line amount in minor currency units, when stated.
    pub amount_cents: Option<i64>,
}

/// Structured fields extracted from free-form invoice text.
///
/// Every field is optional: extraction is best effort and the form is
/// completed manually where the model came up empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceExtraction {
    /// Extracted invoice number.
    pub invoice_number: Option<String>,
    /// Extracted vendor name.
    pub vendor_name: Option<String>,
    /// Extracted invoice date.
    pub invoice_date: Option<NaiveDate>,
    /// Extracted total in minor currency units.
    pub amount_cents: Option<i64>,
    /// Extracted line items.
    pub line_items: Vec<InvoiceLineItem>,
}
