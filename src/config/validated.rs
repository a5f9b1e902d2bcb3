//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use crate::card::{Fact, PotentialAction};
use crate::webhook::{ClientConfig, RetryPolicy, WebhookUrlPolicy};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// How the card text is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    /// Text is sent as given (Markdown)
    #[default]
    Plain,
    /// Text is wrapped in a fenced code block
    CodeBlock,
    /// Text is wrapped in an inline code snippet
    CodeSnippet,
}

/// Card contents gathered from CLI and TOML.
#[derive(Debug, Clone, Default)]
pub struct MessageSettings {
    /// Card title
    pub title: Option<String>,

    /// Card text, before formatting
    pub text: Option<String>,

    /// Card summary
    pub summary: Option<String>,

    /// Accent color
    pub theme_color: Option<String>,

    /// How `text` is rendered
    pub text_format: TextFormat,

    /// Facts for the card's section, in order
    pub facts: Vec<Fact>,

    /// Link buttons, in order
    pub actions: Vec<PotentialAction>,
}

/// Fully validated configuration ready for use by the application.
///
/// This struct represents a complete, validated configuration where all
/// required fields are present and all values have been validated.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Webhook URL, already checked against `client.url_policy`.
    /// Only `None` in dry-run mode.
    pub url: Option<Url>,

    /// Delivery settings for the client
    pub client: ClientConfig,

    /// Card contents
    pub message: MessageSettings,

    /// Dry-run mode (print the card without sending it)
    pub dry_run: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Webhook URLs embed credentials; show the host only
        let host = self
            .url
            .as_ref()
            .and_then(Url::host_str)
            .unwrap_or("none");
        let retry = &self.client.retry_policy;

        write!(
            f,
            "Config {{ host: {}, timeout: {}s, validate_url: {}, retry: {}x/{}s, \
             check_response: {}, facts: {}, actions: {}, dry_run: {} }}",
            host,
            self.client.timeout.as_secs(),
            self.client.url_policy.is_enabled(),
            retry.max_attempts,
            retry.initial_delay.as_secs(),
            self.client.check_response,
            self.message.facts.len(),
            self.message.actions.len(),
            self.dry_run,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL is missing (outside dry-run mode) or rejected by the URL policy
    /// - Regex patterns are invalid
    /// - Duration or retry values are out of range
    /// - The user agent is not a valid header value
    /// - A fact or action is malformed
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let client = Self::build_client_config(cli, toml)?;

        // Checked here so a bad URL is a configuration error, not a delivery one
        let url = Self::resolve_url(cli, toml, &client)?;

        let message = Self::build_message(cli, toml)?;

        Ok(Self {
            url,
            client,
            message,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path. A leading
    /// `~` is expanded to the home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(&expand_home(path))?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_url(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        client: &ClientConfig,
    ) -> Result<Option<Url>, ConfigError> {
        // CLI takes precedence
        let url_str = cli
            .url
            .as_deref()
            .or_else(|| toml.and_then(|t| t.webhook.url.as_deref()));

        match url_str {
            Some(raw) => Ok(Some(client.url_policy.validate(raw)?)),
            None if cli.dry_run => Ok(None),
            None => Err(ConfigError::missing(
                field::URL,
                "Use --url or set webhook.url in config file",
            )),
        }
    }

    fn build_client_config(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<ClientConfig, ConfigError> {
        let mut config = ClientConfig::new()
            .with_timeout(Self::resolve_timeout(cli, toml)?)
            .with_url_policy(Self::build_url_policy(cli, toml)?)
            .with_retry_policy(Self::build_retry_policy(cli, toml)?);

        if let Some(agent) = toml.and_then(|t| t.webhook.user_agent.as_deref()) {
            let value = HeaderValue::from_str(agent).map_err(|e| ConfigError::InvalidUserAgent {
                value: agent.to_string(),
                reason: e.to_string(),
            })?;
            config = config.with_user_agent(value);
        }

        let check_response = toml.and_then(|t| t.webhook.check_response).unwrap_or(true);

        Ok(config.with_check_response(check_response))
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.webhook.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn build_url_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<WebhookUrlPolicy, ConfigError> {
        // Disabling wins from either source
        let enabled =
            !cli.no_validate_url && toml.and_then(|t| t.webhook.validate_url).unwrap_or(true);

        let mut policy = WebhookUrlPolicy::default().with_enabled(enabled);

        // CLI lists replace TOML lists; both extend the built-in defaults
        let prefixes = if cli.url_prefixes.is_empty() {
            toml.map_or(&[][..], |t| t.webhook.url_prefixes.as_slice())
        } else {
            cli.url_prefixes.as_slice()
        };
        for prefix in prefixes {
            policy.add_prefix(prefix.as_str());
        }

        let patterns = if cli.url_patterns.is_empty() {
            toml.map_or(&[][..], |t| t.webhook.url_patterns.as_slice())
        } else {
            cli.url_patterns.as_slice()
        };
        for pattern in patterns {
            policy
                .add_pattern(pattern)
                .map_err(|e| ConfigError::InvalidRegex {
                    pattern: pattern.clone(),
                    source: e,
                })?;
        }

        Ok(policy)
    }

    fn build_retry_policy(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<RetryPolicy, ConfigError> {
        let retry = toml.map(|t| &t.retry);

        // Priority: CLI explicit > TOML > default
        let max_attempts = cli
            .retry_max
            .or_else(|| retry.and_then(|r| r.max_attempts))
            .unwrap_or(defaults::RETRY_MAX_ATTEMPTS);

        let initial_delay_secs = cli
            .retry_delay
            .or_else(|| retry.and_then(|r| r.initial_delay))
            .unwrap_or(defaults::RETRY_INITIAL_DELAY_SECS);

        let max_delay_secs = retry
            .and_then(|r| r.max_delay)
            .unwrap_or(defaults::RETRY_MAX_DELAY_SECS);

        let multiplier = retry
            .and_then(|r| r.multiplier)
            .unwrap_or(defaults::RETRY_MULTIPLIER);

        let schedule: Vec<Duration> = retry
            .map(|r| r.schedule.iter().copied().map(Duration::from_secs).collect())
            .unwrap_or_default();

        if max_attempts == 0 {
            return Err(ConfigError::InvalidRetry(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if initial_delay_secs == 0 {
            return Err(ConfigError::InvalidRetry(
                "initial_delay must be greater than 0".to_string(),
            ));
        }

        if multiplier <= 0.0 || !multiplier.is_finite() {
            return Err(ConfigError::InvalidRetry(
                "multiplier must be a positive finite number".to_string(),
            ));
        }

        if max_delay_secs < initial_delay_secs {
            return Err(ConfigError::InvalidRetry(format!(
                "max_delay ({max_delay_secs}s) must be >= initial_delay ({initial_delay_secs}s)"
            )));
        }

        Ok(RetryPolicy::new()
            .with_max_attempts(max_attempts)
            .with_initial_delay(Duration::from_secs(initial_delay_secs))
            .with_max_delay(Duration::from_secs(max_delay_secs))
            .with_multiplier(multiplier)
            .with_schedule(schedule))
    }

    fn build_message(cli: &Cli, toml: Option<&TomlConfig>) -> Result<MessageSettings, ConfigError> {
        let defaults = toml.map(|t| &t.message);

        let text_format = if cli.code_block {
            TextFormat::CodeBlock
        } else if cli.code_snippet {
            TextFormat::CodeSnippet
        } else {
            TextFormat::Plain
        };

        let facts = cli
            .facts
            .iter()
            .map(|s| parse_fact(s))
            .collect::<Result<Vec<_>, _>>()?;

        let actions = cli
            .actions
            .iter()
            .map(|s| parse_action(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(MessageSettings {
            title: cli
                .title
                .clone()
                .or_else(|| defaults.and_then(|m| m.title.clone())),
            text: cli.text.clone(),
            summary: cli
                .summary
                .clone()
                .or_else(|| defaults.and_then(|m| m.summary.clone())),
            theme_color: cli
                .theme_color
                .clone()
                .or_else(|| defaults.and_then(|m| m.theme_color.clone())),
            text_format,
            facts,
            actions,
        })
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

// Helper functions

/// Replaces a leading `~` with the home directory, if one is known.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

fn split_pair(s: &str) -> Option<(&str, &str)> {
    let (name, value) = s.split_once('=')?;
    let (name, value) = (name.trim(), value.trim());
    (!name.is_empty() && !value.is_empty()).then_some((name, value))
}

fn parse_fact(s: &str) -> Result<Fact, ConfigError> {
    split_pair(s)
        .map(|(name, value)| Fact::new(name, value))
        .ok_or_else(|| ConfigError::InvalidFact {
            value: s.to_string(),
        })
}

fn parse_action(s: &str) -> Result<PotentialAction, ConfigError> {
    let (name, target) = split_pair(s).ok_or_else(|| ConfigError::InvalidAction {
        value: s.to_string(),
        reason: "expected 'Name=URL'".to_string(),
    })?;

    Url::parse(target).map_err(|e| ConfigError::InvalidAction {
        value: s.to_string(),
        reason: e.to_string(),
    })?;

    Ok(PotentialAction::open_uri(name, target))
}
