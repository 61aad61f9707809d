//! Volunteer service entry-point: loads settings, wires the store and event
//! channel, and serves the REST API.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use volunteer_service::config::ServiceSettings;
use volunteer_service::domain::PublishSettings;
use volunteer_service::inbound::http::health::HealthState;
use volunteer_service::outbound::events::{RedisPublisherConfig, RedisStreamPublisher};
use volunteer_service::outbound::persistence::{DbPool, PoolConfig, run_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .wrap_err("failed to load configuration")?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err("invalid VOLUNTEER_BIND_ADDR")?;

    let mut config = ServerConfig::new(bind_addr).with_publish_settings(PublishSettings {
        channel: settings.event_channel().to_owned(),
        timeout: settings.publish_timeout(),
    });

    if let Some(database_url) = settings.database_url() {
        run_migrations(database_url)
            .await
            .wrap_err("failed to apply database migrations")?;
        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
        )
        .await
        .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    match settings.redis_url() {
        Some(redis_url) => {
            let publisher = RedisStreamPublisher::connect_lazy(RedisPublisherConfig::new(redis_url))
                .wrap_err("failed to configure redis publisher")?;
            info!(
                channel = settings.event_channel(),
                "publishing registration events to redis"
            );
            config = config.with_publisher(Arc::new(publisher));
        }
        None => warn!("no redis url configured; registration events will not be published"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting volunteer service");
    let server = create_server(health_state, config).wrap_err("failed to start HTTP server")?;
    server.await.wrap_err("HTTP server terminated abnormally")?;
    Ok(())
}
