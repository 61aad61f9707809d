//! Prometheus adapter for registration event publish outcomes.

use async_trait::async_trait;
use prometheus::{IntCounterVec, Opts, Registry};

use crate::domain::ports::{PublishMetrics, PublishMetricsError, PublishOutcome};

/// Prometheus-backed publish outcome recorder.
///
/// # Metric Specification
///
/// - **Name**: `volunteer_event_publish_total`
/// - **Type**: Counter
/// - **Labels**:
///   - `outcome`: `published`, `failed`, `timed_out`, or `skipped`
pub struct PrometheusPublishMetrics {
    publish_total: IntCounterVec,
}

impl PrometheusPublishMetrics {
    /// Create the counter and register it with `registry`.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric with the same name is already registered.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let publish_total = IntCounterVec::new(
            Opts::new(
                "volunteer_event_publish_total",
                "Registration event publish attempts by outcome",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(publish_total.clone()))?;
        Ok(Self { publish_total })
    }
}

#[async_trait]
impl PublishMetrics for PrometheusPublishMetrics {
    async fn record(&self, outcome: PublishOutcome) -> Result<(), PublishMetricsError> {
        self.publish_total
            .with_label_values(&[outcome.as_label()])
            .inc();
        Ok(())
    }
}
