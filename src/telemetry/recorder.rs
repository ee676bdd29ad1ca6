//! Metrics recorder for stress runs
//!
//! Without an installed recorder every call here is a no-op.

use crate::report::Outcome;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize metric descriptions (call once at startup)
pub fn init_metrics() {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        return;
    }

    describe_counter!(
        "stress_requests_total",
        "Total number of requests attempted, labelled by outcome"
    );
    describe_gauge!(
        "stress_requests_in_flight",
        "Number of requests currently holding an admission slot"
    );
    describe_histogram!(
        "stress_request_duration_seconds",
        "Time from admission to classification of a single request"
    );
    describe_histogram!("stress_run_duration_seconds", "Total duration of a stress run");
}

/// Record a request entering the network phase
pub fn record_request_started() {
    gauge!("stress_requests_in_flight").increment(1.0);
}

/// Record a request being classified
pub fn record_request_outcome(outcome: Outcome, latency: Duration) {
    counter!("stress_requests_total", "outcome" => outcome.as_str()).increment(1);
    gauge!("stress_requests_in_flight").decrement(1.0);
    histogram!("stress_request_duration_seconds").record(latency.as_secs_f64());
}

/// Record a finished run
pub fn record_run_complete(duration: Duration) {
    histogram!("stress_run_duration_seconds").record(duration.as_secs_f64());
}
