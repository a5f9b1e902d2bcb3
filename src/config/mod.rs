//! Configuration layer for the `teams-notify` command.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! The webhook URL has no default. It is required unless `--dry-run` is given,
//! and it is checked against the URL policy while the configuration is built.
//!
//! For URL lists (`url_prefixes`, `url_patterns`), CLI values **replace**
//! TOML values entirely (not merged). Either way they extend the built-in
//! Teams prefixes and patterns.
//!
//! # Boolean Flag Semantics
//!
//! `--no-validate-url` and `validate_url = false` both disable URL checks;
//! a CLI flag cannot turn validation back on once TOML disabled it.
//!
//! # CLI-Only vs TOML-Only Options
//!
//! Card text, facts, actions and code formatting are CLI-only. Some options
//! are TOML-only:
//! - `webhook.user_agent`, `webhook.check_response`
//! - `retry.max_delay`, `retry.multiplier`, `retry.schedule`

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{MessageSettings, TextFormat, ValidatedConfig, write_default_config};
