//! Builders for HTTP state ports backed by the configured adapters.

use std::sync::Arc;

use actix_web::web;

use heliix::inbound::http::state::{HttpState, HttpStatePorts};
use heliix::outbound::persistence::{
    DieselAwardRepository, DieselDocumentRepository, DieselInvoiceRepository,
};

use super::ServerConfig;

/// Build the shared HTTP state from the server configuration.
///
/// Uses Diesel repositories when a pool is configured and in-memory
/// fixtures otherwise, so the same wiring serves production and tests.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => HttpStatePorts {
            awards: Arc::new(DieselAwardRepository::new(pool.clone())),
            invoices: Arc::new(DieselInvoiceRepository::new(pool.clone())),
            documents: Arc::new(DieselDocumentRepository::new(pool.clone())),
            suggestions: Arc::clone(&config.suggestions),
        },
        None => HttpStatePorts {
            suggestions: Arc::clone(&config.suggestions),
            ..HttpStatePorts::default()
        },
    };
    web::Data::new(HttpState::from(ports))
}
