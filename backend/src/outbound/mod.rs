//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed and in-memory volunteer repositories
//! - **events**: Redis Streams publisher for registration events
//! - **metrics**: Prometheus-backed metrics exporters (feature-gated)
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod events;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod persistence;
