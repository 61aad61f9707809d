//! Domain port for counting registration event publish outcomes.
//!
//! Dropped notifications are invisible to clients, so operators rely on
//! these counters to spot channel outages and plan backfills.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording publish metrics.
    pub enum PublishMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "publish metrics exporter failed: {message}",
    }
}

/// Result of one publish attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublishOutcome {
    /// The channel accepted the event.
    Published,
    /// The channel returned an error.
    Failed,
    /// The attempt exceeded the publish timeout.
    TimedOut,
    /// No publisher is configured.
    Skipped,
}

impl PublishOutcome {
    /// Label value used by metric exporters.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Failed => "failed",
            Self::TimedOut => "timed_out",
            Self::Skipped => "skipped",
        }
    }
}

/// Metrics recording port for publish outcomes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublishMetrics: Send + Sync {
    /// Record the outcome of one publish attempt.
    async fn record(&self, outcome: PublishOutcome) -> Result<(), PublishMetricsError>;
}

/// No-op implementation for when metrics are disabled or in tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpPublishMetrics;

#[async_trait]
impl PublishMetrics for NoOpPublishMetrics {
    async fn record(&self, _outcome: PublishOutcome) -> Result<(), PublishMetricsError> {
        Ok(())
    }
}
