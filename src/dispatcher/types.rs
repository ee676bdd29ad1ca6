use crate::dispatcher::error::{StressError, StressResult};
use std::time::Duration;
use tokio::sync::Semaphore;

/// Parameters of a single stress run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressConfig {
    /// Target URL, requested with GET
    pub url: String,
    /// Total number of requests to send
    pub requests: usize,
    /// Maximum number of requests in flight at once
    pub concurrency: usize,
    /// Per-request deadline; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            requests: 100,
            concurrency: 10,
            timeout: None,
        }
    }
}

impl StressConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_requests(mut self, requests: usize) -> Self {
        self.requests = requests;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Check the admission gate can be built.
    ///
    /// The URL is not checked; a malformed URL is counted per request as an
    /// undefined error.
    pub fn validate(&self) -> StressResult<()> {
        if self.concurrency == 0 {
            return Err(StressError::ZeroConcurrency);
        }
        if self.concurrency > Semaphore::MAX_PERMITS {
            return Err(StressError::ConcurrencyTooLarge {
                requested: self.concurrency,
                max: Semaphore::MAX_PERMITS,
            });
        }
        Ok(())
    }
}
