//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports, backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and
//! `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No operational rules reside here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are implementation details, never exposed
//!   to the domain layer.
//! - **Strongly typed errors**: All database errors are mapped to the
//!   port's persistence error types; constraint violations with dedicated
//!   variants are decoded before the generic mapping.

mod diesel_award_repository;
mod diesel_document_repository;
pub(crate) mod diesel_helpers;
mod diesel_invoice_repository;
mod models;
mod pool;
mod schema;

pub use diesel_award_repository::DieselAwardRepository;
pub use diesel_document_repository::DieselDocumentRepository;
pub use diesel_invoice_repository::DieselInvoiceRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
