//! Transport-level error types for the reqwest client.

use thiserror::Error;

/// Error type for transport operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("HTTP status {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },
    /// Response body could not be decoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<Error> for skatequest_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                let e = e.without_url();
                let message = error_chain(&e);
                let error = if e.is_timeout() {
                    skatequest_core::Error::timeout()
                } else {
                    skatequest_core::Error::network_error()
                };
                error.with_message(message).with_source(e)
            }
            Error::Status { status, body } => {
                let error = if matches!(status, 429 | 503 | 504) {
                    skatequest_core::Error::service_unavailable()
                } else {
                    skatequest_core::Error::external_error()
                };
                error.with_message(format!("HTTP status {status}: {body}"))
            }
            Error::Serde(e) => skatequest_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
        }
    }
}

/// Joins an error and its sources into one line, skipping repeated text.
pub(crate) fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
