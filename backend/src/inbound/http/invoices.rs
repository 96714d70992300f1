//! Invoices HTTP handlers.
//!
//! ```text
//! GET  /api/invoices
//! POST /api/invoices
//! PUT  /api/invoices
//! ```
//!
//! Amounts travel as integer minor currency units (`amountCents`); the API
//! never parses or emits decimal currency strings.

use actix_web::{HttpResponse, get, post, put, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{
    Error, Invoice, InvoicePatch, InvoiceValidationError, NewInvoice, NewInvoiceExtras,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::awards::parse_status;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, double_option, invalid_field_error, invalid_field_value_error, missing_field_error,
};

const ID: FieldName = FieldName::new("id");
const INVOICE_NUMBER: FieldName = FieldName::new("invoiceNumber");
const VENDOR_NAME: FieldName = FieldName::new("vendorName");
const AMOUNT_CENTS: FieldName = FieldName::new("amountCents");
const INVOICE_DATE: FieldName = FieldName::new("invoiceDate");
const DUE_DATE: FieldName = FieldName::new("dueDate");

/// Request payload for creating an invoice.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceCreateRequest {
    pub invoice_number: Option<String>,
    pub vendor_name: Option<String>,
    pub amount_cents: Option<i64>,
    pub status: Option<String>,
    pub invoice_date: Option<String>,
    pub due_date: Option<String>,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub award_id: Option<i32>,
}

/// Request payload for partially updating an invoice.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceUpdateRequest {
    pub id: Option<i32>,
    pub invoice_number: Option<String>,
    pub vendor_name: Option<String>,
    pub amount_cents: Option<i64>,
    pub status: Option<String>,
    pub invoice_date: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub award_id: Option<Option<i32>>,
}

fn parse_date(value: String, field: FieldName) -> Result<NaiveDate, Error> {
    value
        .parse()
        .map_err(|_| invalid_field_value_error(field, "dates must be ISO 8601 (YYYY-MM-DD)", value))
}

fn map_validation_error(error: InvoiceValidationError) -> Error {
    match error {
        InvoiceValidationError::EmptyInvoiceNumber => {
            invalid_field_error(INVOICE_NUMBER, "invoice number must not be empty")
        }
        InvoiceValidationError::EmptyVendorName => {
            invalid_field_error(VENDOR_NAME, "vendor name must not be empty")
        }
        InvoiceValidationError::NegativeAmount => {
            invalid_field_error(AMOUNT_CENTS, "amount must not be negative")
        }
    }
}

fn parse_create_request(payload: InvoiceCreateRequest) -> Result<NewInvoice, Error> {
    let invoice_number = payload
        .invoice_number
        .ok_or_else(|| missing_field_error(INVOICE_NUMBER))?;
    let vendor_name = payload
        .vendor_name
        .ok_or_else(|| missing_field_error(VENDOR_NAME))?;
    let amount_cents = payload
        .amount_cents
        .ok_or_else(|| missing_field_error(AMOUNT_CENTS))?;
    let invoice_date = payload
        .invoice_date
        .ok_or_else(|| missing_field_error(INVOICE_DATE))?;
    let invoice_date = parse_date(invoice_date, INVOICE_DATE)?;

    let extras = NewInvoiceExtras {
        status: payload.status.map(parse_status).transpose()?,
        due_date: payload
            .due_date
            .map(|value| parse_date(value, DUE_DATE))
            .transpose()?,
        image_url: payload.image_url,
        notes: payload.notes,
        award_id: payload.award_id,
    };

    NewInvoice::try_new(invoice_number, vendor_name, amount_cents, invoice_date, extras)
        .map_err(map_validation_error)
}

fn parse_update_request(payload: InvoiceUpdateRequest) -> Result<(i32, InvoicePatch), Error> {
    let id = payload.id.ok_or_else(|| missing_field_error(ID))?;
    let patch = InvoicePatch {
        invoice_number: payload.invoice_number,
        vendor_name: payload.vendor_name,
        amount_cents: payload.amount_cents,
        status: payload.status.map(parse_status).transpose()?,
        invoice_date: payload
            .invoice_date
            .map(|value| parse_date(value, INVOICE_DATE))
            .transpose()?,
        due_date: payload
            .due_date
            .map(|value| value.map(|date| parse_date(date, DUE_DATE)).transpose())
            .transpose()?,
        image_url: payload.image_url,
        notes: payload.notes,
        award_id: payload.award_id,
    };
    patch.validate().map_err(map_validation_error)?;
    Ok((id, patch))
}

/// List all invoices, newest first.
#[utoipa::path(
    get,
    path = "/api/invoices",
    responses(
        (status = 200, description = "Invoice records", body = [Invoice]),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "listInvoices"
)]
#[get("/invoices")]
pub async fn list_invoices(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let invoices = state.invoices.list().await?;
    Ok(HttpResponse::Ok().json(invoices))
}

/// Create an invoice record.
#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body = InvoiceCreateRequest,
    responses(
        (status = 200, description = "Stored invoice", body = Invoice),
        (status = 400, description = "Validation failure", body = Error),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "createInvoice"
)]
#[post("/invoices")]
pub async fn create_invoice(
    state: web::Data<HttpState>,
    payload: web::Json<InvoiceCreateRequest>,
) -> ApiResult<HttpResponse> {
    let new = parse_create_request(payload.into_inner())?;
    let invoice = state.invoices.create(new).await?;
    Ok(HttpResponse::Ok().json(invoice))
}

/// Partially update an invoice selected by the `id` field in the body.
#[utoipa::path(
    put,
    path = "/api/invoices",
    request_body = InvoiceUpdateRequest,
    responses(
        (status = 200, description = "Updated invoice", body = Invoice),
        (status = 400, description = "Validation failure", body = Error),
        (status = 404, description = "No invoice with that id", body = Error),
        (status = 503, description = "Record store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["invoices"],
    operation_id = "updateInvoice"
)]
#[put("/invoices")]
pub async fn update_invoice(
    state: web::Data<HttpState>,
    payload: web::Json<InvoiceUpdateRequest>,
) -> ApiResult<HttpResponse> {
    let (id, patch) = parse_update_request(payload.into_inner())?;
    let invoice = state.invoices.update(id, patch).await?;
    Ok(HttpResponse::Ok().json(invoice))
}

#[cfg(test)]
#[path = "invoices_tests.rs"]
mod tests;
