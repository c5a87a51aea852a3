//! Health reporting for upstream services.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Operational status of an upstream service.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, AsRefStr, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceStatus {
    /// Service answers normally.
    #[default]
    Healthy,
    /// Service answers, but with an error status.
    Degraded,
    /// Service cannot be reached.
    Unhealthy,
}

/// Result of a single health probe.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Current service status.
    pub status: ServiceStatus,
    /// Round-trip time of the check.
    pub response: Option<Duration>,
    /// Optional detail about the current state.
    pub message: Option<String>,
}

impl ServiceHealth {
    /// Creates a healthy report.
    pub fn healthy() -> Self {
        Self::default()
    }

    /// Creates a degraded report.
    pub fn degraded(message: impl Into<String>) -> Self {
        Self {
            status: ServiceStatus::Degraded,
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Creates an unhealthy report.
    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: ServiceStatus::Unhealthy,
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Sets the round-trip time.
    #[must_use]
    pub fn with_response_time(mut self, response: Duration) -> Self {
        self.response = Some(response);
        self
    }

    /// Returns true when the service is fully healthy.
    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}
