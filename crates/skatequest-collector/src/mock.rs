//! Scripted Overpass provider for tests.
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! skatequest-collector = { version = "...", features = ["test-utils"] }
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use skatequest_core::{Error, ErrorKind, Result, ServiceHealth};
use skatequest_overpass::{
    Element, OverpassProvider, OverpassQuery, OverpassResponse, OverpassService,
};

/// Scripted reply for one region.
#[derive(Debug, Clone)]
enum Reply {
    Elements(Vec<Element>),
    Failure(ErrorKind, String),
}

/// Overpass provider that answers from a per-region script.
///
/// Regions without a script answer with an empty element list. Every query
/// is recorded so tests can assert on call order.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    replies: Arc<HashMap<String, Reply>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockProvider {
    /// Creates a provider with no scripted regions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful response for a region.
    #[must_use]
    pub fn with_elements(mut self, region: impl Into<String>, elements: Vec<Element>) -> Self {
        Arc::make_mut(&mut self.replies).insert(region.into(), Reply::Elements(elements));
        self
    }

    /// Scripts a failure for a region.
    #[must_use]
    pub fn with_failure(
        mut self,
        region: impl Into<String>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.replies).insert(region.into(), Reply::Failure(kind, message.into()));
        self
    }

    /// Regions queried so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Wraps a clone of this provider in an [`OverpassService`].
    ///
    /// The clone shares the call log with `self`.
    pub fn service(&self) -> OverpassService {
        OverpassService::new(self.clone())
    }
}

#[async_trait::async_trait]
impl OverpassProvider for MockProvider {
    async fn query(&self, query: &OverpassQuery) -> Result<OverpassResponse> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.region().to_owned());

        match self.replies.get(query.region()) {
            Some(Reply::Elements(elements)) => Ok(OverpassResponse {
                elements: elements.clone(),
                remark: None,
            }),
            Some(Reply::Failure(kind, message)) => {
                Err(Error::new(*kind).with_message(message.clone()))
            }
            None => Ok(OverpassResponse::default()),
        }
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}
