//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// teams-notify: post MessageCards to Microsoft Teams
///
/// Builds a card from the command line (and an optional config file) and
/// delivers it to a Teams incoming webhook.
#[derive(Debug, Parser)]
#[command(name = "teams-notify")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run (defaults to `send`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Webhook URL (required unless --dry-run)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Card title
    #[arg(long, global = true)]
    pub title: Option<String>,

    /// Card text (Markdown)
    #[arg(long, global = true)]
    pub text: Option<String>,

    /// Card summary shown in notifications
    #[arg(long, global = true)]
    pub summary: Option<String>,

    /// Accent color as a hex string, e.g. "0076D7"
    #[arg(long = "theme-color", global = true)]
    pub theme_color: Option<String>,

    /// Fact in 'Name=Value' format (can be specified multiple times)
    #[arg(long = "fact", value_name = "NAME=VALUE", global = true)]
    pub facts: Vec<String>,

    /// Link button in 'Name=URL' format (can be specified multiple times)
    #[arg(long = "action", value_name = "NAME=URL", global = true)]
    pub actions: Vec<String>,

    /// Render the text as a fenced code block
    #[arg(long = "code-block", global = true, conflicts_with = "code_snippet")]
    pub code_block: bool,

    /// Render the text as an inline code snippet
    #[arg(long = "code-snippet", global = true)]
    pub code_snippet: bool,

    /// Per-attempt timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Maximum number of delivery attempts
    #[arg(long = "retry-max", global = true)]
    pub retry_max: Option<u32>,

    /// Initial retry delay in seconds
    #[arg(long = "retry-delay", global = true)]
    pub retry_delay: Option<u64>,

    /// Skip webhook URL prefix/pattern validation
    #[arg(long = "no-validate-url", global = true)]
    pub no_validate_url: bool,

    /// Extra accepted URL prefix (can be specified multiple times)
    #[arg(long = "url-prefix", value_name = "PREFIX", global = true)]
    pub url_prefixes: Vec<String>,

    /// Extra accepted URL regex (can be specified multiple times)
    #[arg(long = "url-pattern", value_name = "PATTERN", global = true)]
    pub url_patterns: Vec<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Print the card JSON instead of sending it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for teams-notify
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build and deliver a card
    Send,

    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "teams-notify.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
