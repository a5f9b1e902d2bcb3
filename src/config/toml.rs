//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Webhook configuration section
    #[serde(default)]
    pub webhook: WebhookSection,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetrySection,

    /// Card defaults
    #[serde(default)]
    pub message: MessageSection,
}

/// Webhook configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Webhook URL
    pub url: Option<String>,

    /// Per-attempt timeout in seconds
    pub timeout: Option<u64>,

    /// Check the URL against accepted prefixes and patterns (default: true)
    pub validate_url: Option<bool>,

    /// Extra accepted URL prefixes
    #[serde(default)]
    pub url_prefixes: Vec<String>,

    /// Extra accepted URL regex patterns
    #[serde(default)]
    pub url_patterns: Vec<String>,

    /// `User-Agent` header value
    pub user_agent: Option<String>,

    /// Treat a 2xx body other than `1` as a failure (default: true)
    pub check_response: Option<bool>,
}

/// Retry policy configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetrySection {
    /// Maximum number of delivery attempts
    pub max_attempts: Option<u32>,

    /// Initial retry delay in seconds
    pub initial_delay: Option<u64>,

    /// Maximum retry delay in seconds
    pub max_delay: Option<u64>,

    /// Backoff multiplier
    pub multiplier: Option<f64>,

    /// Explicit per-retry delays in seconds; overrides the backoff
    #[serde(default)]
    pub schedule: Vec<u64>,
}

/// Card defaults section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageSection {
    /// Default card title
    pub title: Option<String>,

    /// Default card summary
    pub summary: Option<String>,

    /// Default accent color
    pub theme_color: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# teams-notify configuration file

[webhook]
# Incoming webhook URL (required unless --dry-run)
# url = "https://contoso.webhook.office.com/webhookb2/..."

# Per-attempt timeout in seconds (default: 5)
# timeout = 5

# Check the URL against known Teams webhook hosts (default: true)
# validate_url = true

# Extra accepted URL prefixes and regex patterns
# Note: CLI values REPLACE these entirely (not merged)
# url_prefixes = ["https://relay.example.com/teams/"]
# url_patterns = ['^https://hooks\.[a-z]+\.example\.com/']

# User-Agent header (default: teams-notify/<version>)
# user_agent = "my-service/1.0"

# Treat a success response whose body is not "1" as a failure (default: true)
# check_response = true

[retry]
# Maximum number of delivery attempts (default: 3)
# max_attempts = 3

# Initial retry delay in seconds (default: 5)
# initial_delay = 5

# Maximum retry delay in seconds, also caps Retry-After (default: 60)
# max_delay = 60

# Backoff multiplier (default: 2.0)
# multiplier = 2.0

# Explicit delays in seconds; overrides the backoff above
# schedule = [2, 5, 10]

[message]
# Defaults used when the matching CLI flag is absent
# title = "Build status"
# summary = "Build status"
# theme_color = "0076D7"
"#
    .to_string()
}
