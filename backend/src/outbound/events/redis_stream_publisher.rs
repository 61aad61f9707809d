//! Redis Streams adapter for the `VolunteerEventPublisher` port.
//!
//! Each event becomes one stream entry appended with
//! `XADD <channel> * key <key> event_type <type> payload <json>`, so
//! consumers can route on the key without decoding the payload.

use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::bb8::{Pool, RunError};
use bb8_redis::redis::{self, RedisError};
use bb8_redis::RedisConnectionManager;
use tracing::debug;

use crate::domain::VolunteerRegisteredEvent;
use crate::domain::ports::{VolunteerEventPublishError, VolunteerEventPublisher};

/// Connection settings for [`RedisStreamPublisher`].
#[derive(Debug, Clone)]
pub struct RedisPublisherConfig {
    redis_url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl RedisPublisherConfig {
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            max_size: 4,
            connection_timeout: Duration::from_secs(2),
        }
    }

    #[must_use]
    pub fn with_max_size(mut self, size: u32) -> Self {
        self.max_size = size.max(1);
        self
    }

    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }
}

/// Publishes registration events to a Redis stream.
#[derive(Clone)]
pub struct RedisStreamPublisher {
    pool: Pool<RedisConnectionManager>,
}

impl RedisStreamPublisher {
    /// Build the publisher without contacting Redis.
    ///
    /// Connections are opened lazily, so an unreachable server surfaces as
    /// [`VolunteerEventPublishError::Unavailable`] on publish rather than at
    /// startup.
    pub fn connect_lazy(config: RedisPublisherConfig) -> Result<Self, VolunteerEventPublishError> {
        let manager = RedisConnectionManager::new(config.redis_url.as_str())
            .map_err(|err| VolunteerEventPublishError::unavailable(err.to_string()))?;
        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build_unchecked(manager);
        Ok(Self { pool })
    }
}

/// Field/value pairs written to the stream entry.
fn stream_fields(
    key: &str,
    event: &VolunteerRegisteredEvent,
) -> Result<[(&'static str, String); 3], VolunteerEventPublishError> {
    let payload = serde_json::to_string(event)
        .map_err(|err| VolunteerEventPublishError::serialization(err.to_string()))?;
    Ok([
        ("key", key.to_owned()),
        ("event_type", event.event_type.clone()),
        ("payload", payload),
    ])
}

fn map_redis_error(error: &RedisError) -> VolunteerEventPublishError {
    if error.is_io_error()
        || error.is_connection_refusal()
        || error.is_connection_dropped()
        || error.is_timeout()
    {
        VolunteerEventPublishError::unavailable(error.to_string())
    } else {
        VolunteerEventPublishError::rejected(error.to_string())
    }
}

fn map_pool_error(error: RunError<RedisError>) -> VolunteerEventPublishError {
    match error {
        RunError::User(err) => map_redis_error(&err),
        RunError::TimedOut => {
            VolunteerEventPublishError::unavailable("timed out waiting for a redis connection")
        }
    }
}

#[async_trait]
impl VolunteerEventPublisher for RedisStreamPublisher {
    async fn publish(
        &self,
        channel: &str,
        key: &str,
        event: &VolunteerRegisteredEvent,
    ) -> Result<(), VolunteerEventPublishError> {
        let fields = stream_fields(key, event)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut xadd = redis::cmd("XADD");
        xadd.arg(channel).arg("*");
        for (field, value) in &fields {
            xadd.arg(*field).arg(value.as_str());
        }
        let entry_id: String = xadd
            .query_async(&mut *conn)
            .await
            .map_err(|err| map_redis_error(&err))?;

        debug!(channel, key, entry_id, "registration event appended");
        Ok(())
    }
}
