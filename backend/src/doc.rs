//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the REST API: every record and assist endpoint from the inbound layer
//! plus the health probes. The generated specification backs Swagger UI in
//! debug builds.

use utoipa::OpenApi;

use crate::domain::{
    Award, AwardCategorySuggestion, Document, Error, ErrorCode, Invoice, InvoiceExtraction,
    InvoiceLineItem, RecordStatus,
};
use crate::inbound::http::assist::AssistRequest;
use crate::inbound::http::awards::{AwardCreateRequest, AwardUpdateRequest};
use crate::inbound::http::documents::DocumentCreateRequest;
use crate::inbound::http::invoices::{InvoiceCreateRequest, InvoiceUpdateRequest};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "HELiiX operations API",
        description = "Awards inventory, invoices, documents, and AI-assist \
                       suggestions for the conference operations office."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::awards::list_awards,
        crate::inbound::http::awards::create_award,
        crate::inbound::http::awards::update_award,
        crate::inbound::http::invoices::list_invoices,
        crate::inbound::http::invoices::create_invoice,
        crate::inbound::http::invoices::update_invoice,
        crate::inbound::http::documents::list_documents,
        crate::inbound::http::documents::create_document,
        crate::inbound::http::assist::suggest_award_category,
        crate::inbound::http::assist::extract_invoice_fields,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Award,
        AwardCreateRequest,
        AwardUpdateRequest,
        Invoice,
        InvoiceCreateRequest,
        InvoiceUpdateRequest,
        Document,
        DocumentCreateRequest,
        AssistRequest,
        AwardCategorySuggestion,
        InvoiceExtraction,
        InvoiceLineItem,
        RecordStatus,
        Error,
        ErrorCode,
    )),
    tags(
        (name = "awards", description = "Awards inventory records"),
        (name = "invoices", description = "Vendor invoice records"),
        (name = "documents", description = "Uploaded document metadata"),
        (name = "assist", description = "AI-assisted suggestions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn document_includes_every_record_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/awards",
            "/api/invoices",
            "/api/documents",
            "/api/assist/award-category",
            "/api/assist/invoice-extraction",
            "/health/ready",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn document_registers_the_error_schema() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.schemas.contains_key("Error"));
        assert!(components.schemas.contains_key("RecordStatus"));
    }
}
