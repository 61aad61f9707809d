//! Builders wiring the volunteer coordinator to its store and event channel.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use volunteer_service::domain::VolunteerRegistrationService;
use volunteer_service::domain::ports::{
    PublishMetrics, VolunteerCommand, VolunteerQuery, VolunteerRepository,
};
use volunteer_service::inbound::http::state::HttpState;
use volunteer_service::outbound::persistence::{
    DieselVolunteerRepository, InMemoryVolunteerRepository,
};

use super::ServerConfig;

type VolunteerPorts = (Arc<dyn VolunteerCommand>, Arc<dyn VolunteerQuery>);

/// Build the coordinator over `repository` and expose it as both ports.
fn build_volunteer_ports<R>(
    repository: R,
    config: &ServerConfig,
    metrics: Arc<dyn PublishMetrics>,
) -> VolunteerPorts
where
    R: VolunteerRepository + 'static,
{
    let service = VolunteerRegistrationService::new(Arc::new(repository), Arc::new(DefaultClock))
        .with_metrics(metrics)
        .with_publish_settings(config.publish_settings.clone());
    let service = match &config.publisher {
        Some(publisher) => service.with_publisher(Arc::clone(publisher)),
        None => service,
    };
    let service = Arc::new(service);
    (service.clone(), service)
}

/// Assemble handler state, using the database when a pool is configured and
/// the in-memory store otherwise.
pub(super) fn build_http_state(
    config: &ServerConfig,
    metrics: Arc<dyn PublishMetrics>,
) -> web::Data<HttpState> {
    let (commands, queries) = match &config.db_pool {
        Some(pool) => {
            build_volunteer_ports(DieselVolunteerRepository::new(pool.clone()), config, metrics)
        }
        None => {
            warn!("no database configured; volunteer records are kept in memory only");
            build_volunteer_ports(InMemoryVolunteerRepository::default(), config, metrics)
        }
    };
    web::Data::new(HttpState::new(commands, queries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rstest::rstest;
    use volunteer_service::domain::ports::{
        NoOpPublishMetrics, RegisterVolunteerRequest, VolunteerEventPublishError,
        VolunteerEventPublisher,
    };
    use volunteer_service::domain::{PublishSettings, VolunteerRegisteredEvent};

    #[derive(Default)]
    struct RecordingPublisher {
        sent: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl VolunteerEventPublisher for RecordingPublisher {
        async fn publish(
            &self,
            channel: &str,
            key: &str,
            _event: &VolunteerRegisteredEvent,
        ) -> Result<(), VolunteerEventPublishError> {
            self.sent
                .lock()
                .expect("publisher lock")
                .push((channel.to_owned(), key.to_owned()));
            Ok(())
        }
    }

    fn jane() -> RegisterVolunteerRequest {
        RegisterVolunteerRequest {
            name: "Jane".to_owned(),
            phone: "0711000111".to_owned(),
            ward: "Kibra".to_owned(),
            ..RegisterVolunteerRequest::default()
        }
    }

    fn config() -> ServerConfig {
        ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)))
    }

    #[rstest]
    #[tokio::test]
    async fn without_pool_state_uses_in_memory_store() {
        let state = build_http_state(&config(), Arc::new(NoOpPublishMetrics));

        let created = state.volunteers.register(jane()).await.expect("register");
        let fetched = state
            .volunteers_query
            .get_by_id(created.id)
            .await
            .expect("shared store");
        assert_eq!(fetched, created);
        assert_eq!(state.volunteers_query.count_active().await.expect("count"), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn configured_publisher_and_channel_are_used() {
        let publisher = Arc::new(RecordingPublisher::default());
        let config = config()
            .with_publisher(publisher.clone())
            .with_publish_settings(PublishSettings {
                channel: "ward-events".to_owned(),
                ..PublishSettings::default()
            });
        let state = build_http_state(&config, Arc::new(NoOpPublishMetrics));

        let created = state.volunteers.register(jane()).await.expect("register");

        let sent = publisher.sent.lock().expect("publisher lock").clone();
        assert_eq!(sent, vec![("ward-events".to_owned(), created.id.to_string())]);
    }
}
