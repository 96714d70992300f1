//! HTTP inbound adapter exposing REST endpoints.

pub mod assist;
pub mod awards;
pub mod documents;
pub mod error;
pub mod health;
pub mod invoices;
pub mod state;
pub mod validation;

pub use error::ApiResult;
