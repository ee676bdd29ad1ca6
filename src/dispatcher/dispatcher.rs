use crate::dispatcher::error::StressResult;
use crate::dispatcher::task::RequestTask;
use crate::dispatcher::types::StressConfig;
use crate::report::{Outcome, Report, ReportSnapshot};
use crate::telemetry::record_run_complete;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::Instrument;

/// Fires a fixed number of GET requests through a bounded admission gate
pub struct Dispatcher {
    config: StressConfig,
    client: Client,
}

impl Dispatcher {
    /// Create a dispatcher with a default HTTP client
    pub fn new(config: StressConfig) -> StressResult<Self> {
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// Create a dispatcher around an existing client.
    ///
    /// `config.timeout` is ignored; configure deadlines on the client.
    pub fn with_client(config: StressConfig, client: Client) -> StressResult<Self> {
        config.validate()?;
        Ok(Self { config, client })
    }

    /// Send every request and wait for all of them to be classified.
    ///
    /// Requests are admitted in index order; at most `concurrency` hold a
    /// slot at any time, and no more task handles than that are kept.
    /// Per-request failures only show up in the report.
    pub async fn run(&self) -> Arc<Report> {
        let report = Arc::new(Report::new());
        report.start_execution();

        let concurrency = self.config.concurrency;
        let gate = Arc::new(Semaphore::new(concurrency));
        let url: Arc<str> = Arc::from(self.config.url.as_str());
        let mut tasks = JoinSet::new();

        tracing::info!(
            ">>>>>> Starting {} requests with concurrency {}",
            self.config.requests,
            self.config.concurrency
        );

        for index in 0..self.config.requests {
            while tasks.len() >= concurrency {
                if let Some(result) = tasks.join_next().await {
                    reap(&report, result);
                }
            }

            // The gate is never closed, so acquisition only fails on a bug
            let permit = match gate.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    tracing::error!("Admission gate closed at request {}: {}", index, e);
                    break;
                }
            };

            let task = RequestTask {
                index,
                url: url.clone(),
                client: self.client.clone(),
                report: report.clone(),
            };
            tasks.spawn(task.run(permit));
        }

        while let Some(result) = tasks.join_next().await {
            reap(&report, result);
        }

        report.end_execution();
        record_run_complete(report.elapsed());
        report
    }
}

/// Settle a finished request task. A panicked task counted its attempt but
/// never classified it, so it lands in the undefined bucket.
fn reap(report: &Report, result: Result<(), JoinError>) {
    if let Err(e) = result {
        tracing::error!("Request task failed to complete: {}", e);
        if e.is_panic() {
            report.record(Outcome::Undefined);
        }
    }
}

/// Run one stress test end to end: build the dispatcher, send every
/// request, log the execution report and return its snapshot.
pub async fn run_stress_test(config: StressConfig) -> StressResult<ReportSnapshot> {
    let dispatcher = Dispatcher::new(config)?;
    Ok(run_with(&dispatcher).await)
}

/// Same as [`run_stress_test`] with a prepared dispatcher
pub async fn run_with(dispatcher: &Dispatcher) -> ReportSnapshot {
    let run_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("stress_test", %run_id);

    async move {
        tracing::info!("Starting stress test...");
        let report = dispatcher.run().await;
        report.show();
        tracing::info!("Stress test finished...");
        report.snapshot()
    }
    .instrument(span)
    .await
}
