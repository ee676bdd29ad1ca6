//! Metrics and observability module
//!
//! Prometheus-compatible metrics for a stress run:
//! - Requests attempted, by outcome
//! - Requests in flight
//! - Per-request and per-run durations

pub mod exporter;
pub mod recorder;

pub use exporter::{start_metrics_server, MetricsConfig, MetricsError};
pub use recorder::{
    init_metrics, record_request_outcome, record_request_started, record_run_complete,
};
