#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod connect;
mod error;
mod query;
mod response;
mod service;

pub use skatequest_core::{Error, ErrorKind, Result, ServiceHealth, ServiceStatus};

pub use crate::connect::{DEFAULT_ENDPOINT, OverpassClient, OverpassConfig};
pub use crate::query::{DEFAULT_ADMIN_LEVEL, DEFAULT_QUERY_TIMEOUT_SECS, OverpassQuery};
pub use crate::response::{Center, Element, ElementKind, OverpassResponse};
pub use crate::service::OverpassService;

/// Tracing target for Overpass service operations.
pub const TRACING_TARGET: &str = "skatequest_overpass::service";

/// Tracing target for the reqwest transport.
pub const TRACING_TARGET_CLIENT: &str = "skatequest_overpass::client";

/// Core trait for running Overpass queries.
///
/// Implement this trait to plug a different transport (or a scripted mock)
/// into the collector.
#[async_trait::async_trait]
pub trait OverpassProvider: Send + Sync {
    /// Runs a query and returns the decoded response.
    async fn query(&self, query: &OverpassQuery) -> Result<OverpassResponse>;

    /// Checks whether the Overpass instance is reachable and answering.
    async fn health_check(&self) -> Result<ServiceHealth>;
}
