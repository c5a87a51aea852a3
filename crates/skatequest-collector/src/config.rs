//! Collector configuration.

use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use skatequest_core::{Error, Result};

use crate::regions;

/// Default output file.
pub const DEFAULT_OUTPUT_PATH: &str = "parks.json";

/// Default pause between two region queries: 2 seconds.
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 2_000;

/// Configuration for a collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct CollectorConfig {
    /// Pause between region queries in milliseconds
    #[cfg_attr(
        feature = "config",
        arg(long = "request-delay-ms", env = "REQUEST_DELAY_MS", default_value_t = DEFAULT_REQUEST_DELAY_MS)
    )]
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Output JSON file
    #[cfg_attr(
        feature = "config",
        arg(short = 'o', long = "output", env = "OUTPUT_PATH", default_value = DEFAULT_OUTPUT_PATH)
    )]
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Region to query, repeatable (default: all 50 U.S. states)
    #[cfg_attr(
        feature = "config",
        arg(long = "region", env = "REGIONS", value_delimiter = ',')
    )]
    #[serde(default)]
    pub regions: Vec<String>,
}

const fn default_request_delay_ms() -> u64 {
    DEFAULT_REQUEST_DELAY_MS
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: default_request_delay_ms(),
            output: default_output(),
            regions: Vec::new(),
        }
    }
}

impl CollectorConfig {
    /// Set the pause between region queries.
    #[must_use]
    pub fn with_request_delay_ms(mut self, delay_ms: u64) -> Self {
        self.request_delay_ms = delay_ms;
        self
    }

    /// Set the output path.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Set the regions to query.
    #[must_use]
    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the pause between region queries.
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Returns the regions to query, falling back to the 50 U.S. states.
    pub fn regions(&self) -> Vec<String> {
        if self.regions.is_empty() {
            regions::us_states()
        } else {
            self.regions.clone()
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the output path is empty or a
    /// region name is blank.
    pub fn validate(&self) -> Result<()> {
        if self.output.as_os_str().is_empty() {
            return Err(Error::configuration().with_message("output path cannot be empty"));
        }

        if self.regions.iter().any(|region| region.trim().is_empty()) {
            return Err(Error::configuration().with_message("region names cannot be blank"));
        }

        Ok(())
    }
}
