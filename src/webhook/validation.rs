//! Webhook URL validation.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;
use url::Url;

use super::UrlValidationError;

/// Prefixes of legacy Office 365 connector webhooks.
pub const DEFAULT_URL_PREFIXES: &[&str] = &[
    "https://outlook.office.com/webhook/",
    "https://outlook.office365.com/webhook/",
];

/// Patterns of tenant-specific connector and Power Automate workflow URLs.
pub const DEFAULT_URL_PATTERNS: &[&str] = &[
    r"^https://[a-z0-9-]+\.webhook\.office\.com/",
    r"^https://prod-\d+\.[a-z0-9]+\.logic\.azure\.com(:\d+)?/workflows/",
];

static DEFAULT_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DEFAULT_URL_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// Which destination URLs a client accepts.
///
/// When enabled, a URL is accepted if it starts with one of the prefixes
/// or matches one of the patterns. Whether enabled or not, the URL must
/// parse.
///
/// # Example
///
/// ```
/// use teams_notify::webhook::WebhookUrlPolicy;
///
/// let policy = WebhookUrlPolicy::default().with_prefix("https://hooks.internal.example/");
/// assert!(policy.validate("https://hooks.internal.example/teams/1").is_ok());
/// assert!(policy.validate("https://evil.example/").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct WebhookUrlPolicy {
    enabled: bool,
    prefixes: Vec<String>,
    patterns: Vec<Regex>,
}

impl Default for WebhookUrlPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            prefixes: DEFAULT_URL_PREFIXES.iter().map(ToString::to_string).collect(),
            patterns: DEFAULT_REGEXES.clone(),
        }
    }
}

impl WebhookUrlPolicy {
    /// Creates an enabled policy that accepts nothing until prefixes or
    /// patterns are added.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            enabled: true,
            prefixes: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// Creates a policy that only checks that the URL parses.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default().with_enabled(false)
    }

    /// Enables or disables prefix/pattern matching.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Adds an accepted URL prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.add_prefix(prefix);
        self
    }

    /// Adds an accepted URL pattern.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.add_pattern(pattern)?;
        Ok(self)
    }

    /// Adds an accepted URL prefix in place.
    pub fn add_prefix(&mut self, prefix: impl Into<String>) {
        self.prefixes.push(prefix.into());
    }

    /// Adds an accepted URL pattern in place.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` does not compile; the policy is
    /// left unchanged.
    pub fn add_pattern(&mut self, pattern: &str) -> Result<(), regex::Error> {
        self.patterns.push(Regex::new(pattern)?);
        Ok(())
    }

    /// Returns true if prefix/pattern matching is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the accepted prefixes.
    #[must_use]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns the accepted patterns as strings.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(Regex::as_str)
    }

    /// Parses `url` and checks it against the policy.
    ///
    /// # Errors
    ///
    /// Returns [`UrlValidationError::Invalid`] if the URL does not parse, or
    /// [`UrlValidationError::NotAccepted`] if validation is enabled and the
    /// URL matches no prefix or pattern.
    pub fn validate(&self, url: &str) -> Result<Url, UrlValidationError> {
        let parsed = Url::parse(url).map_err(|e| UrlValidationError::Invalid {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !self.enabled {
            debug!("Webhook URL validation disabled, skipping prefix checks");
            return Ok(parsed);
        }

        let by_prefix = self.prefixes.iter().any(|p| url.starts_with(p.as_str()));
        let by_pattern = || self.patterns.iter().any(|re| re.is_match(url));

        if by_prefix || by_pattern() {
            Ok(parsed)
        } else {
            Err(UrlValidationError::NotAccepted {
                url: url.to_string(),
            })
        }
    }
}
