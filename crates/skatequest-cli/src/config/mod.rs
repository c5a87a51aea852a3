//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── overpass: OverpassConfig    # Endpoint, HTTP/query timeouts, admin level
//! └── collector: CollectorConfig  # Regions, courtesy delay, output file
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! skatequest --region Oregon --http-timeout 120 -o parks.json
//!
//! # Or via environment variables
//! REGIONS=Oregon HTTP_TIMEOUT=120 skatequest
//! ```

use std::process;

use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use skatequest_collector::CollectorConfig;
use skatequest_overpass::OverpassConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
///
/// Combines all configuration groups for a collection run:
/// - [`OverpassConfig`]: Overpass endpoint and query settings
/// - [`CollectorConfig`]: Regions, pacing and output
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "skatequest")]
#[command(about = "Collect skatepark locations from OpenStreetMap into a JSON file")]
#[command(version)]
pub struct Cli {
    /// Overpass API client configuration.
    #[clap(flatten)]
    pub overpass: OverpassConfig,

    /// Collection run configuration.
    #[clap(flatten)]
    pub collector: CollectorConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// This is the preferred way to initialize the CLI configuration as it ensures
    /// .env files are loaded before clap parses arguments, allowing environment
    /// variables from .env to be used as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.overpass
            .validate()
            .context("invalid Overpass configuration")?;
        self.collector
            .validate()
            .context("invalid collector configuration")?;
        Ok(())
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Logs configuration.
    pub fn log(&self) {
        Self::log_build_info();

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            endpoint = %self.overpass.endpoint,
            http_timeout_secs = self.overpass.http_timeout,
            query_timeout_secs = self.overpass.query_timeout,
            admin_level = self.overpass.admin_level,
            "Overpass configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            regions = self.collector.regions().len(),
            custom_regions = !self.collector.regions.is_empty(),
            request_delay_ms = self.collector.request_delay_ms,
            output = %self.collector.output.display(),
            "Collector configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
