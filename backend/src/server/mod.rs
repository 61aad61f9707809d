//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use volunteer_service::Trace;
#[cfg(debug_assertions)]
use volunteer_service::doc::ApiDoc;
use volunteer_service::domain::ports::PublishMetrics;
#[cfg(not(feature = "metrics"))]
use volunteer_service::domain::ports::NoOpPublishMetrics;
use volunteer_service::inbound::http::health::{HealthState, live, ready};
use volunteer_service::inbound::http::state::HttpState;
use volunteer_service::inbound::http::validation::{json_config, query_config};
use volunteer_service::inbound::http::volunteers::volunteers_scope;
#[cfg(feature = "metrics")]
use volunteer_service::outbound::metrics::PrometheusPublishMetrics;

#[cfg(feature = "metrics")]
fn build_prometheus() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("volunteer_service")
        .endpoint("/metrics")
        .build()
        .map_err(|e| std::io::Error::other(format!("prometheus middleware setup failed: {e}")))
}

/// Build the publish outcome recorder on the Prometheus registry.
///
/// # Errors
/// Returns [`std::io::Error`] if metric registration fails.
#[cfg(feature = "metrics")]
fn build_publish_metrics(prometheus: &PrometheusMetrics) -> std::io::Result<Arc<dyn PublishMetrics>> {
    let metrics = PrometheusPublishMetrics::new(&prometheus.registry).map_err(|e| {
        std::io::Error::other(format!("publish metrics registration failed: {e}"))
    })?;
    Ok(Arc::new(metrics))
}

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

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .wrap(Trace)
        .service(volunteers_scope())
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
/// # Parameters
/// - `health_state`: shared readiness state, marked ready once the listener is bound.
/// - `config`: pre-built [`ServerConfig`] holding the bind address and adapters.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();

    #[cfg(feature = "metrics")]
    let prometheus = build_prometheus()?;
    #[cfg(feature = "metrics")]
    let publish_metrics = build_publish_metrics(&prometheus)?;
    #[cfg(not(feature = "metrics"))]
    let publish_metrics: Arc<dyn PublishMetrics> = Arc::new(NoOpPublishMetrics);

    let http_state = build_http_state(&config, publish_metrics);
    let bind_addr = config.bind_addr;

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
