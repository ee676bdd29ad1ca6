use crate::report::{Outcome, Report};
use crate::telemetry::{record_request_outcome, record_request_started};
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::OwnedSemaphorePermit;

/// One GET attempt and its classification
pub(crate) struct RequestTask {
    pub index: usize,
    pub url: Arc<str>,
    pub client: Client,
    pub report: Arc<Report>,
}

impl RequestTask {
    /// Run the attempt while holding an admission slot. The slot is released
    /// when `permit` drops, after the outcome has been recorded.
    ///
    /// The outcome goes into the report last: a task that panics has counted
    /// its attempt and nothing else.
    pub async fn run(self, permit: OwnedSemaphorePermit) {
        self.report.record_attempt();

        let start = Instant::now();
        record_request_started();

        let outcome = self.execute().await;

        record_request_outcome(outcome, start.elapsed());
        self.report.record(outcome);
        drop(permit);
    }

    async fn execute(&self) -> Outcome {
        let request = match self.client.get(&*self.url).build() {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(index = self.index, "error creating request: {}", e);
                return Outcome::Undefined;
            }
        };

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                // Classified on headers; the body is closed unread
                drop(response);
                tracing::debug!(index = self.index, status = status.as_u16(), "request completed");
                Outcome::from_status(status)
            }
            Err(e) => {
                tracing::warn!(index = self.index, "request failed: {}", e);
                Outcome::from_transport_error(e.status())
            }
        }
    }
}
