#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use std::process;

use anyhow::Context;
use skatequest_collector::{CollectionReport, Collector};
use skatequest_overpass::{OverpassClient, OverpassService};

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "skatequest_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "skatequest_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "skatequest_cli::config";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SHUTDOWN,
            "collection finished successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "collection terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();
    cli.validate()?;

    let service = create_service(&cli)?;
    check_health(&service).await;

    let collector = Collector::new(service).with_overpass_config(&cli.overpass);
    let report = collector
        .run(&cli.collector)
        .await
        .context("failed to collect skateparks")?;

    log_summary(&report);
    Ok(())
}

/// Creates the Overpass service from configuration.
fn create_service(cli: &Cli) -> anyhow::Result<OverpassService> {
    let client =
        OverpassClient::new(cli.overpass.clone()).context("failed to create Overpass client")?;
    Ok(client.into_service())
}

/// Checks the Overpass instance before the run; an unhealthy instance is
/// reported but does not stop the collection.
async fn check_health(service: &OverpassService) {
    match service.health_check().await {
        Ok(health) if health.is_healthy() => {
            tracing::info!(
                target: TRACING_TARGET_STARTUP,
                response_ms = health.response.map(|r| r.as_millis()),
                "Overpass instance is reachable"
            );
        }
        Ok(health) => {
            tracing::warn!(
                target: TRACING_TARGET_STARTUP,
                status = %health.status,
                message = health.message.as_deref(),
                "Overpass instance is not healthy, queries may fail"
            );
        }
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_STARTUP,
                error = %error,
                "Overpass health check failed"
            );
        }
    }
}

/// Logs the end-of-run summary.
fn log_summary(report: &CollectionReport) {
    let failed: Vec<&str> = report
        .failed_regions()
        .map(|failed| failed.region.as_str())
        .collect();

    tracing::info!(
        target: TRACING_TARGET_SHUTDOWN,
        total = report.total(),
        regions = report.regions.len(),
        failed = ?failed,
        "Collection summary"
    );
}
