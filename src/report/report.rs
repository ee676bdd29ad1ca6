use crate::report::types::{Outcome, ReportSnapshot};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Stamp {
    wall: DateTime<Utc>,
    instant: Instant,
}

impl Stamp {
    fn now() -> Self {
        Self {
            wall: Utc::now(),
            instant: Instant::now(),
        }
    }
}

/// Shared outcome tally for one stress run.
///
/// Counters only ever grow. Every task bumps `total_requests` once and then
/// exactly one outcome bucket, so after all tasks are joined the buckets sum
/// to the total.
#[derive(Debug, Default)]
pub struct Report {
    execution_start: Mutex<Option<Stamp>>,
    execution_end: Mutex<Option<Stamp>>,

    total_requests: AtomicU64,
    total_200: AtomicU64,
    total_404: AtomicU64,
    total_429: AtomicU64,
    total_500: AtomicU64,
    total_undefined_errors: AtomicU64,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_execution(&self) {
        *self.execution_start.lock() = Some(Stamp::now());
    }

    pub fn end_execution(&self) {
        *self.execution_end.lock() = Some(Stamp::now());
    }

    /// Count one attempted request
    pub fn record_attempt(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one classified outcome
    pub fn record(&self, outcome: Outcome) {
        self.counter(outcome).fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_requests(&self) -> u64 {
        self.total_requests.load(Ordering::Relaxed)
    }

    pub fn count(&self, outcome: Outcome) -> u64 {
        self.counter(outcome).load(Ordering::Relaxed)
    }

    /// Time between start and end of execution; zero until both are stamped
    pub fn elapsed(&self) -> Duration {
        let start = *self.execution_start.lock();
        let end = *self.execution_end.lock();
        match (start, end) {
            (Some(start), Some(end)) => end.instant.saturating_duration_since(start.instant),
            _ => Duration::ZERO,
        }
    }

    pub fn snapshot(&self) -> ReportSnapshot {
        ReportSnapshot {
            started_at: self.execution_start.lock().map(|s| s.wall),
            finished_at: self.execution_end.lock().map(|s| s.wall),
            total_requests: self.total_requests(),
            total_200: self.count(Outcome::Success),
            total_404: self.count(Outcome::NotFound),
            total_429: self.count(Outcome::RateLimited),
            total_500: self.count(Outcome::ServerError),
            total_undefined_errors: self.count(Outcome::Undefined),
            elapsed_secs: self.elapsed().as_secs_f64(),
        }
    }

    /// Write the execution report to the log output
    pub fn show(&self) {
        for line in self.snapshot().render_lines() {
            tracing::info!("{}", line);
        }
    }

    fn counter(&self, outcome: Outcome) -> &AtomicU64 {
        match outcome {
            Outcome::Success => &self.total_200,
            Outcome::NotFound => &self.total_404,
            Outcome::RateLimited => &self.total_429,
            Outcome::ServerError => &self.total_500,
            Outcome::Undefined => &self.total_undefined_errors,
        }
    }
}
