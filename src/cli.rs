//! Command-line surface
//!
//! The command table is a plain clap derive tree; `main` parses it and
//! dispatches on [`Command`].

use crate::dispatcher::StressConfig;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "fullcycle-stress", version)]
#[command(about = "Fire a fixed number of GET requests at a URL and report the outcomes")]
pub struct Cli {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send N requests with at most C in flight and print an execution report
    #[command(name = "stress-test", alias = "stressTest")]
    StressTest(StressTestArgs),
}

#[derive(Args, Debug, Clone)]
pub struct StressTestArgs {
    /// URL to test
    #[arg(short, long)]
    pub url: String,

    /// Number of requests to send
    #[arg(short, long, default_value_t = 100)]
    pub requests: usize,

    /// Number of concurrent requests
    #[arg(short, long, default_value_t = 10)]
    pub concurrency: usize,

    /// Per-request deadline in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Additional report format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Serve Prometheus metrics on this address during the run
    #[arg(long)]
    pub metrics_addr: Option<SocketAddr>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Log output only
    Text,
    /// Log output, then the snapshot as JSON on stdout
    Json,
}

impl StressTestArgs {
    pub fn to_config(&self) -> StressConfig {
        let mut config = StressConfig::new(self.url.clone())
            .with_requests(self.requests)
            .with_concurrency(self.concurrency);
        if let Some(ms) = self.timeout_ms {
            config = config.with_timeout(Duration::from_millis(ms));
        }
        config
    }
}
