//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::{Settings, SettingsError};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use heliix::Correlation;
#[cfg(debug_assertions)]
use heliix::doc::ApiDoc;
use heliix::inbound::http::assist::{extract_invoice_fields, suggest_award_category};
use heliix::inbound::http::awards::{create_award, list_awards, update_award};
use heliix::inbound::http::documents::{create_document, list_documents};
use heliix::inbound::http::health::{HealthState, live, ready};
use heliix::inbound::http::invoices::{create_invoice, list_invoices, update_invoice};
use heliix::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api")
        .service(list_awards)
        .service(create_award)
        .service(update_award)
        .service(list_invoices)
        .service(create_invoice)
        .service(update_invoice)
        .service(list_documents)
        .service(create_document)
        .service(suggest_award_category)
        .service(extract_invoice_fields);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Correlation)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);
    let ServerConfig {
        bind_addr,
        db_pool: _,
        suggestions: _,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let prometheus = match prometheus {
        Some(prometheus) => prometheus,
        None => actix_web_prom::PrometheusMetricsBuilder::new("heliix")
            .endpoint("/metrics")
            .build()
            .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))?,
    };

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(actix_web::middleware::Compat::new(prometheus.clone()));

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
