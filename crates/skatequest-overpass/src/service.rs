//! Overpass service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    OverpassProvider, OverpassQuery, OverpassResponse, Result, ServiceHealth, TRACING_TARGET,
};

/// Overpass service wrapper with observability.
///
/// This wrapper adds structured logging to any query implementation.
/// The inner provider is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct OverpassService {
    inner: Arc<dyn OverpassProvider>,
}

impl fmt::Debug for OverpassService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverpassService").finish_non_exhaustive()
    }
}

impl OverpassService {
    /// Create a new Overpass service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: OverpassProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Runs a query against the wrapped provider.
    pub async fn query(&self, query: &OverpassQuery) -> Result<OverpassResponse> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            region = %query.region(),
            admin_level = query.admin_level(),
            server_timeout_secs = query.server_timeout(),
            "Running Overpass query"
        );

        let result = self.inner.query(query).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    region = %query.region(),
                    elements = response.elements.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Overpass query succeeded"
                );
            }
            Err(error) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    region = %query.region(),
                    error_kind = %error.kind,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Overpass query error"
                );
            }
        }

        result
    }

    /// Checks the health of the wrapped provider.
    pub async fn health_check(&self) -> Result<ServiceHealth> {
        let result = self.inner.health_check().await;

        match &result {
            Ok(health) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    status = %health.status,
                    response_ms = health.response.map(|r| r.as_millis()),
                    message = health.message.as_deref(),
                    "Overpass health check completed"
                );
            }
            Err(error) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Overpass health check failed"
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use crate::{Element, Error, ErrorKind, ServiceStatus};

    use super::*;

    struct FixedProvider;

    #[async_trait::async_trait]
    impl OverpassProvider for FixedProvider {
        async fn query(&self, query: &OverpassQuery) -> Result<OverpassResponse> {
            if query.region() == "Atlantis" {
                return Err(Error::timeout().with_message("Request timed out"));
            }

            Ok(OverpassResponse {
                elements: vec![Element::node(1, 1.0, 2.0)],
                remark: None,
            })
        }

        async fn health_check(&self) -> Result<ServiceHealth> {
            Ok(ServiceHealth::degraded("HTTP status 429"))
        }
    }

    #[tokio::test]
    async fn test_service_forwards_success() {
        let service = OverpassService::new(FixedProvider);
        let response = service
            .query(&OverpassQuery::skateparks("Ohio"))
            .await
            .unwrap();
        assert_eq!(response.elements.len(), 1);
    }

    #[tokio::test]
    async fn test_service_forwards_error() {
        let service = OverpassService::new(FixedProvider).clone();
        let error = service
            .query(&OverpassQuery::skateparks("Atlantis"))
            .await
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_service_forwards_health() {
        let service = OverpassService::new(FixedProvider);
        let health = service.health_check().await.unwrap();
        assert_eq!(health.status, ServiceStatus::Degraded);
    }
}
