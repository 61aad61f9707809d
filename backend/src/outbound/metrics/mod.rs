//! Prometheus-backed implementations of domain metrics ports.
//!
//! Feature-gated behind the `metrics` feature.

mod prometheus_publish;

pub use prometheus_publish::PrometheusPublishMetrics;
