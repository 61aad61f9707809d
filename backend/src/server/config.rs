//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use volunteer_service::domain::PublishSettings;
use volunteer_service::domain::ports::VolunteerEventPublisher;
use volunteer_service::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) publisher: Option<Arc<dyn VolunteerEventPublisher>>,
    pub(crate) publish_settings: PublishSettings,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            publisher: None,
            publish_settings: PublishSettings::default(),
        }
    }

    /// Attach a database connection pool.
    ///
    /// Without one the server keeps volunteer records in memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Attach the registration event publisher.
    #[must_use]
    pub fn with_publisher(mut self, publisher: Arc<dyn VolunteerEventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    #[must_use]
    pub fn with_publish_settings(mut self, settings: PublishSettings) -> Self {
        self.publish_settings = settings;
        self
    }
}
