use anyhow::{Context, Result};
use clap::Parser;
use fullcycle_stress::cli::{Cli, Command, OutputFormat, StressTestArgs};
use fullcycle_stress::run_stress_test;
use fullcycle_stress::telemetry::{start_metrics_server, MetricsConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .init();

    match cli.command {
        Command::StressTest(args) => stress_test(args).await,
    }
}

async fn stress_test(args: StressTestArgs) -> Result<()> {
    if let Some(addr) = args.metrics_addr {
        start_metrics_server(MetricsConfig::with_addr(addr))
            .with_context(|| format!("Failed to start metrics exporter on {addr}"))?;
    }

    let snapshot = run_stress_test(args.to_config())
        .await
        .context("Stress test could not start")?;

    if args.format == OutputFormat::Json {
        println!("{}", snapshot.to_json()?);
    }

    Ok(())
}
