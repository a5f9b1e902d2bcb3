//! Webhook sender trait and the Teams client.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::card::MessageCard;
use crate::time::{Sleeper, TokioSleeper};

use super::{
    AttemptError, ClientConfig, HttpClient, HttpError, HttpRequest, ReqwestClient, WebhookError,
};

/// Body a connector webhook returns when it accepted a card.
pub const EXPECTED_RESPONSE_TEXT: &str = "1";

/// Trait for delivering cards to a webhook.
///
/// Lets callers swap the real client for a mock in tests.
///
/// # Implementation Notes
///
/// Implementations should handle retries internally if appropriate,
/// returning [`WebhookError::RetriesExhausted`] when all attempts fail.
pub trait WebhookSender: Send + Sync {
    /// Sends `card` to the webhook at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookError`] if the URL is rejected, the card cannot be
    /// serialized, or delivery fails.
    fn send(
        &self,
        url: &str,
        card: &MessageCard,
    ) -> impl std::future::Future<Output = Result<(), WebhookError>> + Send;
}

/// Client delivering MessageCards to Teams incoming webhooks.
///
/// Validates the destination, serializes the card and POSTs it, retrying
/// transient failures according to the configured [`RetryPolicy`].
///
/// # Type Parameters
///
/// - `H`: The HTTP transport
/// - `S`: The sleeper used between retries (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```no_run
/// use teams_notify::card::MessageCard;
/// use teams_notify::webhook::{TeamsClient, WebhookSender};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = TeamsClient::new();
/// let card = MessageCard::simple("Deploy finished", "Version 1.4.2 is live");
/// client
///     .send("https://example.webhook.office.com/webhookb2/abc", &card)
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// [`RetryPolicy`]: super::RetryPolicy
#[derive(Debug)]
pub struct TeamsClient<H = ReqwestClient, S = TokioSleeper> {
    client: H,
    sleeper: S,
    config: ClientConfig,
}

impl TeamsClient<ReqwestClient, TokioSleeper> {
    /// Creates a client using reqwest and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_client(ReqwestClient::new())
    }
}

impl Default for TeamsClient<ReqwestClient, TokioSleeper> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> TeamsClient<H, TokioSleeper> {
    /// Creates a client over a custom transport with default settings.
    #[must_use]
    pub fn with_client(client: H) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            config: ClientConfig::default(),
        }
    }
}

impl<H, S> TeamsClient<H, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> TeamsClient<H, S2> {
        TeamsClient {
            client: self.client,
            sleeper,
            config: self.config,
        }
    }

    /// Replaces the client configuration.
    #[must_use]
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl<H: HttpClient, S: Sleeper> TeamsClient<H, S> {
    /// Sends `card` to `url`, giving up early if `cancel` fires.
    ///
    /// Cancellation aborts the in-flight attempt or backoff wait and skips
    /// the remaining retries.
    ///
    /// # Errors
    ///
    /// - [`WebhookError::UrlValidation`] before any network I/O
    /// - [`WebhookError::Serialization`] if the card cannot be encoded
    /// - [`WebhookError::Delivery`], [`WebhookError::UnexpectedResponse`] or
    ///   [`WebhookError::Transport`] for terminal failures, without retry
    /// - [`WebhookError::RetriesExhausted`] once every attempt failed
    /// - [`WebhookError::Cancelled`] if `cancel` fired
    pub async fn send_with_cancel(
        &self,
        url: &str,
        card: &MessageCard,
        cancel: &CancellationToken,
    ) -> Result<(), WebhookError> {
        let request = self.build_request(url, card)?;
        let policy = &self.config.retry_policy;
        let host = request.url.host_str().unwrap_or_default();

        let mut attempt: u32 = 1;
        loop {
            let outcome = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(WebhookError::Cancelled),
                outcome = self.execute_request(&request) => outcome,
            };

            let error = match outcome {
                Ok(()) => {
                    info!(host, attempt, "Card delivered");
                    return Ok(());
                }
                Err(e) => e,
            };

            if !error.is_retryable() {
                warn!(host, attempt, error = %error, "Delivery failed with a terminal error");
                return Err(error.into());
            }

            if !policy.should_retry(attempt) {
                warn!(host, attempt, error = %error, "Delivery failed, no attempts left");
                return Err(WebhookError::RetriesExhausted {
                    attempts: attempt,
                    last_error: error,
                });
            }

            let delay = policy.delay_with_hint(attempt - 1, error.retry_after());
            warn!(
                host,
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %error,
                "Delivery attempt failed, retrying"
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(WebhookError::Cancelled),
                () = self.sleeper.sleep(delay) => {}
            }

            attempt += 1;
        }
    }

    /// Validates the URL and builds the request carrying the card.
    fn build_request(&self, url: &str, card: &MessageCard) -> Result<HttpRequest, WebhookError> {
        let url = self.config.url_policy.validate(url)?;
        let body = card.to_json_bytes().map_err(WebhookError::Serialization)?;
        debug!(bytes = body.len(), "Serialized card");

        Ok(HttpRequest::post(url)
            .with_json_body(body)
            .with_header(http::header::USER_AGENT, self.config.user_agent.clone()))
    }

    /// Executes a single attempt under the configured timeout.
    async fn execute_request(&self, request: &HttpRequest) -> Result<(), AttemptError> {
        let response = tokio::time::timeout(self.config.timeout, self.client.request(request.clone()))
            .await
            .map_err(|_| HttpError::Timeout)??;

        if !response.is_success() {
            return Err(AttemptError::NonSuccessStatus {
                status: response.status,
                body: response.body_text().map(ToString::to_string),
                retry_after: response.retry_after(),
            });
        }

        if self.config.check_response {
            let text = response.body_text().unwrap_or_default().trim();
            if !text.is_empty() && text != EXPECTED_RESPONSE_TEXT {
                return Err(AttemptError::UnexpectedResponse {
                    body: text.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl<H: HttpClient, S: Sleeper> WebhookSender for TeamsClient<H, S> {
    async fn send(&self, url: &str, card: &MessageCard) -> Result<(), WebhookError> {
        self.send_with_cancel(url, card, &CancellationToken::new())
            .await
    }
}

/// Extension trait for checking if an error is retryable.
///
/// Classifies each attempt outcome once; [`TeamsClient`] never retries a
/// terminal error.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient and should be retried.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            // Network errors are typically transient
            Self::Connection(_) | Self::Timeout => true,
            // URL errors are configuration issues, not transient
            Self::InvalidUrl(_) => false,
        }
    }
}

impl IsRetryable for AttemptError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_retryable(),
            // 5xx, 429 and 408 are transient; other 4xx mean the card is wrong
            Self::NonSuccessStatus { status, .. } => {
                status.is_server_error()
                    || *status == http::StatusCode::TOO_MANY_REQUESTS
                    || *status == http::StatusCode::REQUEST_TIMEOUT
            }
            Self::UnexpectedResponse { .. } => false,
        }
    }
}
