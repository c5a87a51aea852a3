//! Reqwest-based HTTP client for the Overpass API.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use skatequest_core::{Error, Result, ServiceHealth};
use url::Url;

use super::OverpassConfig;
use crate::error::{Error as TransportError, error_chain};
use crate::{
    OverpassProvider, OverpassQuery, OverpassResponse, OverpassService, TRACING_TARGET_CLIENT,
};

/// Number of body characters kept in error messages.
const ERROR_BODY_LIMIT: usize = 512;

/// Inner client that holds the HTTP client and configuration.
struct OverpassClientInner {
    http: Client,
    endpoint: Url,
    status_url: Url,
    config: OverpassConfig,
}

/// Reqwest-based client that runs Overpass queries over HTTP(S).
///
/// Each query is one `GET {endpoint}?data={ql}` request bounded by the
/// configured timeout. Non-success statuses and undecodable bodies are
/// reported as errors; nothing is retried.
///
/// # Examples
///
/// ```rust,ignore
/// use skatequest_overpass::{OverpassClient, OverpassConfig, OverpassQuery};
///
/// let client = OverpassClient::new(OverpassConfig::default())?;
/// let response = client.query(&OverpassQuery::skateparks("Utah")).await?;
/// ```
#[derive(Clone)]
pub struct OverpassClient {
    inner: Arc<OverpassClientInner>,
}

impl std::fmt::Debug for OverpassClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverpassClient")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

impl OverpassClient {
    /// Creates a new Overpass client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: OverpassConfig) -> Result<Self> {
        let timeout = config.effective_timeout();
        let user_agent = config.effective_user_agent();

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            endpoint = %config.endpoint,
            timeout_ms = timeout.as_millis(),
            user_agent = %user_agent,
            "Creating Overpass client"
        );

        config.validate()?;
        let endpoint = config.endpoint_url()?;
        let status_url = endpoint.join("status").map_err(|e| {
            Error::configuration()
                .with_message("failed to derive Overpass status URL")
                .with_source(e)
        })?;

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(&user_agent)
            .build()
            .map_err(|e| {
                Error::configuration()
                    .with_message("failed to create HTTP client")
                    .with_source(e)
            })?;

        let inner = OverpassClientInner {
            http,
            endpoint,
            status_url,
            config,
        };

        tracing::info!(
            target: TRACING_TARGET_CLIENT,
            endpoint = %inner.endpoint,
            "Overpass client created successfully"
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a new Overpass client with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(OverpassConfig::default())
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &OverpassConfig {
        &self.inner.config
    }

    /// Converts this client into an [`OverpassService`] for use with dependency injection.
    pub fn into_service(self) -> OverpassService {
        OverpassService::new(self)
    }

    /// Sends one query and decodes the body.
    async fn send(
        &self,
        query: &OverpassQuery,
    ) -> std::result::Result<OverpassResponse, TransportError> {
        let ql = query.to_ql();

        let response = self
            .inner
            .http
            .get(self.inner.endpoint.clone())
            .query(&[("data", ql.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(ERROR_BODY_LIMIT)
                .collect();

            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let decoded = serde_json::from_slice::<OverpassResponse>(&bytes)?;
        Ok(decoded)
    }
}

#[async_trait::async_trait]
impl OverpassProvider for OverpassClient {
    async fn query(&self, query: &OverpassQuery) -> Result<OverpassResponse> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            region = %query.region(),
            endpoint = %self.inner.endpoint,
            "Sending Overpass query"
        );

        let result = self.send(query).await.map_err(Error::from);
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) => {
                if let Some(remark) = &response.remark {
                    tracing::warn!(
                        target: TRACING_TARGET_CLIENT,
                        region = %query.region(),
                        remark = %remark,
                        "Overpass returned a remark, results may be incomplete"
                    );
                }

                tracing::debug!(
                    target: TRACING_TARGET_CLIENT,
                    region = %query.region(),
                    elements = response.elements.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Overpass query completed"
                );
            }
            Err(error) => {
                tracing::debug!(
                    target: TRACING_TARGET_CLIENT,
                    region = %query.region(),
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Overpass query failed"
                );
            }
        }

        result
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        let started_at = Instant::now();

        let health = match self.inner.http.get(self.inner.status_url.clone()).send().await {
            Ok(response) if response.status().is_success() => ServiceHealth::healthy(),
            Ok(response) => {
                ServiceHealth::degraded(format!("HTTP status {}", response.status().as_u16()))
            }
            Err(e) => ServiceHealth::unhealthy(error_chain(&e.without_url())),
        };

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            status_url = %self.inner.status_url,
            status = %health.status,
            "Overpass health check completed"
        );

        Ok(health.with_response_time(started_at.elapsed()))
    }
}
