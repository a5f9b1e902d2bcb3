//! Error types for webhook delivery.

use std::time::Duration;

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong at the transport level without dictating
/// recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error type for a single delivery attempt.
///
/// Each variant is classified as retryable or terminal by
/// [`IsRetryable`](super::IsRetryable).
#[derive(Debug, Error)]
pub enum AttemptError {
    /// Transport-level failure.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The webhook answered with a non-2xx status.
    #[error("HTTP {status}{}", body_suffix(.body))]
    NonSuccessStatus {
        /// Response status
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
        /// Delay requested by the server via `Retry-After`
        retry_after: Option<Duration>,
    },

    /// The webhook answered 2xx but with a body other than the expected `1`.
    #[error("Unexpected webhook response: {body}")]
    UnexpectedResponse {
        /// Response body
        body: String,
    },
}

impl AttemptError {
    /// Returns the server-requested retry delay, if any.
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::NonSuccessStatus { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Error type for webhook URL validation.
#[derive(Debug, Error)]
pub enum UrlValidationError {
    /// The URL could not be parsed.
    #[error("Invalid webhook URL '{url}': {reason}")]
    Invalid {
        /// The rejected URL
        url: String,
        /// Parse failure reason
        reason: String,
    },

    /// The URL matched none of the accepted prefixes or patterns.
    #[error("Webhook URL '{url}' does not match any accepted prefix or pattern")]
    NotAccepted {
        /// The rejected URL
        url: String,
    },
}

/// Error type for sending a card.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The destination URL was rejected before any network I/O.
    #[error(transparent)]
    UrlValidation(#[from] UrlValidationError),

    /// The card could not be serialized.
    #[error("Failed to serialize card: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The webhook rejected the card with a client error status.
    #[error("Webhook rejected the card with HTTP {status}{}", body_suffix(.body))]
    Delivery {
        /// Response status
        status: http::StatusCode,
        /// Response body, if it was valid UTF-8
        body: Option<String>,
    },

    /// The webhook accepted the request but reported a failure in its body.
    #[error("Unexpected webhook response: {body}")]
    UnexpectedResponse {
        /// Response body
        body: String,
    },

    /// A transport error that retrying cannot fix.
    #[error("Transport error: {0}")]
    Transport(#[source] HttpError),

    /// Every attempt failed with a retryable error.
    #[error("Delivery failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        #[source]
        last_error: AttemptError,
    },

    /// Delivery was cancelled by the caller.
    #[error("Delivery cancelled")]
    Cancelled,
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .filter(|b| !b.is_empty())
        .map(|b| format!(": {b}"))
        .unwrap_or_default()
}

impl From<AttemptError> for WebhookError {
    fn from(error: AttemptError) -> Self {
        match error {
            AttemptError::Http(e) => Self::Transport(e),
            AttemptError::NonSuccessStatus { status, body, .. } => Self::Delivery { status, body },
            AttemptError::UnexpectedResponse { body } => Self::UnexpectedResponse { body },
        }
    }
}
