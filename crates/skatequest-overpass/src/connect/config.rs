//! Overpass client configuration.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use skatequest_core::{Error, Result};
use url::Url;

use crate::query::{DEFAULT_ADMIN_LEVEL, DEFAULT_QUERY_TIMEOUT_SECS};

/// Default public Overpass endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Default client-side timeout for HTTP requests: 90 seconds.
///
/// Longer than the server-side query timeout so the server gets to report
/// its own timeout first.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 90;

/// Configuration for the Overpass HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct OverpassConfig {
    /// Overpass API interpreter URL
    #[cfg_attr(
        feature = "config",
        arg(long = "overpass-url", env = "OVERPASS_URL", default_value = DEFAULT_ENDPOINT)
    )]
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// HTTP request timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value_t = DEFAULT_HTTP_TIMEOUT_SECS)
    )]
    #[serde(default = "default_http_timeout")]
    pub http_timeout: u64,

    /// Server-side query timeout in seconds
    #[cfg_attr(
        feature = "config",
        arg(long = "query-timeout", env = "OVERPASS_QUERY_TIMEOUT", default_value_t = DEFAULT_QUERY_TIMEOUT_SECS)
    )]
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Administrative level of the areas regions are matched against
    #[cfg_attr(
        feature = "config",
        arg(long = "admin-level", env = "OVERPASS_ADMIN_LEVEL", default_value_t = DEFAULT_ADMIN_LEVEL)
    )]
    #[serde(default = "default_admin_level")]
    pub admin_level: u8,

    /// User-Agent header to send with requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

const fn default_http_timeout() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

const fn default_query_timeout() -> u64 {
    DEFAULT_QUERY_TIMEOUT_SECS
}

const fn default_admin_level() -> u8 {
    DEFAULT_ADMIN_LEVEL
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            http_timeout: default_http_timeout(),
            query_timeout: default_query_timeout(),
            admin_level: default_admin_level(),
            user_agent: None,
        }
    }
}

impl OverpassConfig {
    /// Set the endpoint URL.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the HTTP timeout in seconds.
    #[must_use]
    pub fn with_http_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }

    /// Set the server-side query timeout in seconds.
    #[must_use]
    pub fn with_query_timeout(mut self, timeout_secs: u64) -> Self {
        self.query_timeout = timeout_secs;
        self
    }

    /// Set the administrative level regions are matched against.
    #[must_use]
    pub fn with_admin_level(mut self, admin_level: u8) -> Self {
        self.admin_level = admin_level;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the effective HTTP timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .filter(|agent| !agent.is_empty())
            .unwrap_or_else(Self::default_user_agent)
    }

    /// Returns the default user agent string.
    fn default_user_agent() -> String {
        format!("skatequest/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Parses the endpoint URL.
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            Error::configuration()
                .with_message(format!("Overpass URL '{}' is invalid: {e}", self.endpoint))
                .with_source(e)
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::configuration().with_message(format!(
                "Overpass URL '{}' must start with http:// or https://",
                self.endpoint
            )));
        }

        Ok(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - the endpoint is not an http(s) URL
    /// - the query timeout is zero
    /// - the admin level is outside 1-11
    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;

        if self.query_timeout == 0 {
            return Err(Error::configuration().with_message("query timeout cannot be zero"));
        }

        if !(1..=11).contains(&self.admin_level) {
            return Err(Error::configuration().with_message(format!(
                "admin level {} is invalid. Must be between 1 and 11.",
                self.admin_level
            )));
        }

        Ok(())
    }
}
