//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use heliix::inbound::http::health::HealthState;
use heliix::outbound::assist::AssistHttpSource;
use heliix::outbound::persistence::{DbPool, PoolConfig};

mod server;

use server::{ServerConfig, Settings};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("configuration load failed: {e}")))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let mut config = ServerConfig::new(bind_addr);

    match settings.database_url.as_deref() {
        Some(url) => {
            let pool_config = PoolConfig::new(url).with_max_size(settings.db_pool_size());
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|e| std::io::Error::other(format!("database pool setup failed: {e}")))?;
            config = config.with_db_pool(pool);
        }
        None if settings.allow_fixture => {
            warn!("HELIIX_DATABASE_URL is not set; serving from in-memory fixtures");
        }
        None => {
            return Err(std::io::Error::other(
                "HELIIX_DATABASE_URL is not set; set it or opt into fixture mode with \
                 HELIIX_ALLOW_FIXTURE=1",
            ));
        }
    }

    match settings
        .assist_credentials()
        .map_err(|e| std::io::Error::other(e.to_string()))?
    {
        Some(credentials) => {
            let source = AssistHttpSource::new(credentials)
                .map_err(|e| std::io::Error::other(format!("assist adapter setup failed: {e}")))?;
            config = config.with_suggestions(std::sync::Arc::new(source));
        }
        None => {
            info!("assist credentials not configured; suggestion endpoints use canned answers");
        }
    }

    #[cfg(feature = "metrics")]
    {
        let prometheus = actix_web_prom::PrometheusMetricsBuilder::new("heliix")
            .endpoint("/metrics")
            .build()
            .map_err(|e| std::io::Error::other(format!("metrics registration failed: {e}")))?;
        config = config.with_metrics(prometheus);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting HTTP server");
    let server = server::create_server(health_state, config)?;
    server.await
}
