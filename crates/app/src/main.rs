//! Objects API contract suite binary.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use objects_contract::{Settings, run_objects_suite};
use probe_application::{Harness, ReportCollector, Suite};
use probe_infrastructure::{ConsoleReportSink, JsonFileReportSink, ReqwestHttpClient, SystemClock};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::from_env().context("invalid suite settings")?;

    let client = ReqwestHttpClient::new().context("could not create HTTP client")?;
    let harness = Arc::new(Harness::new(Arc::new(client), settings.harness_config()));

    let mut collector = ReportCollector::open(Arc::new(SystemClock::new()));
    tracing::info!(
        run_id = %collector.run_id(),
        base_url = %settings.base_url,
        timeout_ms = settings.timeout_ms,
        "Starting objects contract suite v{}",
        env!("CARGO_PKG_VERSION")
    );
    collector.add(ConsoleReportSink::stdout());
    if let Some(path) = &settings.report_path {
        collector.add(JsonFileReportSink::new(path));
    }

    {
        let suite = Suite::new(harness, &collector);
        run_objects_suite(&suite).await;
    }

    let report = collector.close().context("could not write the run report")?;
    Ok(if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
