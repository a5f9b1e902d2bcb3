//! Client configuration.

use std::time::Duration;

use super::{RetryPolicy, WebhookUrlPolicy};

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Immutable settings for a [`TeamsClient`](super::TeamsClient).
///
/// Every client gets its own copy, so differently configured clients can
/// coexist in one process.
///
/// # Defaults
///
/// - `timeout`: 5 seconds per attempt
/// - `url_policy`: enabled, Office 365 connector and workflow URLs
/// - `retry_policy`: [`RetryPolicy::default`]
/// - `user_agent`: [`DEFAULT_USER_AGENT`]
/// - `check_response`: true
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Time limit for a single delivery attempt.
    pub timeout: Duration,

    /// Which destination URLs are accepted.
    pub url_policy: WebhookUrlPolicy,

    /// Attempt ceiling and backoff.
    pub retry_policy: RetryPolicy,

    /// `User-Agent` header value.
    pub user_agent: http::HeaderValue,

    /// Treat a 2xx body other than `1` as a failure.
    pub check_response: bool,
}

impl ClientConfig {
    /// Default per-attempt timeout (5 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            url_policy: WebhookUrlPolicy::default(),
            retry_policy: RetryPolicy::default(),
            user_agent: http::HeaderValue::from_static(DEFAULT_USER_AGENT),
            check_response: true,
        }
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the URL validation policy.
    #[must_use]
    pub fn with_url_policy(mut self, policy: WebhookUrlPolicy) -> Self {
        self.url_policy = policy;
        self
    }

    /// Accepts one more URL prefix on top of the current policy.
    #[must_use]
    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_policy.add_prefix(prefix);
        self
    }

    /// Accepts one more URL pattern on top of the current policy.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn with_url_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.url_policy.add_pattern(pattern)?;
        Ok(self)
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Sets the `User-Agent` header value.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: http::HeaderValue) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Enables or disables the `1` response body check.
    #[must_use]
    pub const fn with_check_response(mut self, check: bool) -> Self {
        self.check_response = check;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ClientConfig::default();

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.url_policy.is_enabled());
        assert_eq!(config.retry_policy, RetryPolicy::default());
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.check_response);
    }

    #[test]
    fn user_agent_names_crate_and_version() {
        assert!(DEFAULT_USER_AGENT.starts_with("teams-notify/"));
    }

    #[test]
    fn extra_prefix_and_pattern_extend_defaults() {
        let config = ClientConfig::new()
            .with_url_prefix("https://relay.example/")
            .with_url_pattern(r"^https://hooks\.[a-z]+\.example/")
            .unwrap();

        assert!(config.url_policy.validate("https://relay.example/1").is_ok());
        assert!(config.url_policy.validate("https://hooks.corp.example/2").is_ok());
        assert!(
            config
                .url_policy
                .validate("https://outlook.office.com/webhook/3")
                .is_ok()
        );
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(ClientConfig::new().with_url_pattern("[").is_err());
    }
}
