//! Domain primitives, aggregates, and record services.
//!
//! Purpose: Define strongly typed records used by the API and persistence
//! layers, plus the services that apply operational rules on top of the
//! repository ports. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode — API error response payload and stable identifiers.
//! - RecordStatus — lifecycle shared by awards and invoices.
//! - Award / Invoice / Document families — validated payload and row types.
//! - AwardsService / InvoicesService / DocumentsService — record services.
//! - ports — repository and suggestion-source traits with fixtures.

pub mod award;
pub mod awards_service;
pub mod document;
pub mod documents_service;
pub mod error;
pub mod invoice;
pub mod invoices_service;
pub mod ports;
pub mod status;
pub mod suggestion;

pub use self::award::{Award, AwardPatch, AwardValidationError, NewAward};
pub use self::awards_service::AwardsService;
pub use self::document::{
    Document, DocumentValidationError, EntityKind, EntityKindParseError, NewDocument,
};
pub use self::documents_service::DocumentsService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::invoice::{
    Invoice, InvoicePatch, InvoiceValidationError, NewInvoice, NewInvoiceExtras,
};
pub use self::invoices_service::InvoicesService;
pub use self::status::{RecordStatus, RecordStatusParseError};
pub use self::suggestion::{AwardCategorySuggestion, InvoiceExtraction, InvoiceLineItem};
