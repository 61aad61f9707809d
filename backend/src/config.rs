//! Service configuration loaded via OrthoConfig.
//!
//! Values come from `VOLUNTEER_*` environment variables, matching CLI flags,
//! or a configuration file, in OrthoConfig's usual precedence order.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_EVENT_CHANNEL, DEFAULT_PUBLISH_TIMEOUT};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8003";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Runtime settings for the volunteer service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "VOLUNTEER")]
pub struct ServiceSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it records are kept in memory.
    pub database_url: Option<String>,
    /// Redis URL for the event channel. Without it events are not published.
    pub redis_url: Option<String>,
    /// Stream name registration events are appended to.
    pub event_channel: Option<String>,
    /// Upper bound on a single publish attempt, in milliseconds.
    pub publish_timeout_ms: Option<u64>,
    /// Maximum pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl ServiceSettings {
    /// Return the bind address, falling back to `0.0.0.0:8003`.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .trim()
            .parse()
    }

    /// Return the configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        non_blank(self.database_url.as_deref())
    }

    /// Return the configured Redis URL, ignoring blank values.
    pub fn redis_url(&self) -> Option<&str> {
        non_blank(self.redis_url.as_deref())
    }

    /// Return the event channel, falling back to `volunteer-events`.
    pub fn event_channel(&self) -> &str {
        non_blank(self.event_channel.as_deref()).unwrap_or(DEFAULT_EVENT_CHANNEL)
    }

    /// Return the publish timeout, falling back to 250 ms.
    pub fn publish_timeout(&self) -> Duration {
        self.publish_timeout_ms
            .map_or(DEFAULT_PUBLISH_TIMEOUT, Duration::from_millis)
    }

    /// Return the database pool size, falling back to 10.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    //! Unit tests for service configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "VOLUNTEER_BIND_ADDR",
        "VOLUNTEER_DATABASE_URL",
        "VOLUNTEER_REDIS_URL",
        "VOLUNTEER_EVENT_CHANNEL",
        "VOLUNTEER_PUBLISH_TIMEOUT_MS",
        "VOLUNTEER_DB_MAX_CONNECTIONS",
    ];

    fn load_from_empty_args() -> ServiceSettings {
        ServiceSettings::load_from_iter([OsString::from("volunteer-service")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default parses"),
            SocketAddr::from(([0, 0, 0, 0], 8003))
        );
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.redis_url(), None);
        assert_eq!(settings.event_channel(), "volunteer-events");
        assert_eq!(settings.publish_timeout(), Duration::from_millis(250));
        assert_eq!(settings.db_max_connections(), 10);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("VOLUNTEER_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "VOLUNTEER_DATABASE_URL",
                Some("postgres://db/volunteers".to_owned()),
            ),
            ("VOLUNTEER_REDIS_URL", Some("redis://cache:6379/".to_owned())),
            ("VOLUNTEER_EVENT_CHANNEL", Some("ward-events".to_owned())),
            ("VOLUNTEER_PUBLISH_TIMEOUT_MS", Some("1000".to_owned())),
            ("VOLUNTEER_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("valid address"),
            SocketAddr::from(([127, 0, 0, 1], 9000))
        );
        assert_eq!(settings.database_url(), Some("postgres://db/volunteers"));
        assert_eq!(settings.redis_url(), Some("redis://cache:6379/"));
        assert_eq!(settings.event_channel(), "ward-events");
        assert_eq!(settings.publish_timeout(), Duration::from_secs(1));
        assert_eq!(settings.db_max_connections(), 4);
    }

    #[rstest]
    fn blank_urls_count_as_missing() {
        let mut guard_vars = VARS.map(|name| (name, None::<String>));
        guard_vars[1].1 = Some("   ".to_owned());
        guard_vars[2].1 = Some(String::new());
        let _guard = lock_env(guard_vars);

        let settings = load_from_empty_args();
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.redis_url(), None);
    }

    #[rstest]
    fn malformed_bind_addr_is_an_error() {
        let _guard = lock_env([("VOLUNTEER_BIND_ADDR", Some("not-an-address".to_owned()))]);

        assert!(load_from_empty_args().bind_addr().is_err());
    }
}
