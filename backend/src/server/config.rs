//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use heliix::domain::ports::{FixtureSuggestionSource, SuggestionSource};
use heliix::outbound::persistence::DbPool;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) suggestions: Arc<dyn SuggestionSource>,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    /// Construct a server configuration bound to the given address.
    ///
    /// Starts with fixture suggestions and no database pool; attach real
    /// adapters with the `with_*` builders.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            suggestions: Arc::new(FixtureSuggestionSource),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// When provided, the server uses Diesel-backed repositories for
    /// awards, invoices, and documents instead of in-memory fixtures.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Replace the suggestion source used by the assist endpoints.
    #[must_use]
    pub fn with_suggestions(mut self, suggestions: Arc<dyn SuggestionSource>) -> Self {
        self.suggestions = suggestions;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(any(test, doctest)),
        expect(
            dead_code,
            reason = "Exercised by integration tests; retained for fixture access"
        )
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    /// Attach pre-built Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: PrometheusMetrics) -> Self {
        self.prometheus = Some(prometheus);
        self
    }
}
