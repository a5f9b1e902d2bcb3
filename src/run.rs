//! Application execution logic.
//!
//! This module builds the card from the validated configuration and either
//! prints it (dry-run) or delivers it, giving up if a shutdown signal
//! arrives first.

use std::future::Future;

use thiserror::Error;
use tokio::signal;

use teams_notify::card::{CardError, MessageCard, Section};
use teams_notify::config::{MessageSettings, TextFormat, ValidatedConfig};
use teams_notify::format::{FormatError, format_as_code_block, format_as_code_snippet};
use teams_notify::webhook::{ReqwestClient, TeamsClient, WebhookError, WebhookSender};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The card text could not be formatted.
    #[error("Failed to format text: {0}")]
    Format(#[from] FormatError),

    /// The card contents are invalid.
    #[error("Invalid card: {0}")]
    Card(#[from] CardError),

    /// The card could not be serialized for printing.
    #[error("Failed to serialize card: {0}")]
    Serialization(#[source] serde_json::Error),

    /// No destination and not a dry run.
    #[error("No webhook URL configured")]
    NoDestination,

    /// Delivery failed.
    #[error("Delivery failed: {0}")]
    Delivery(#[from] WebhookError),

    /// A shutdown signal arrived before delivery finished.
    #[error("Interrupted before delivery completed")]
    Interrupted,
}

impl RunError {
    /// Returns true if the card was valid but could not be delivered.
    #[must_use]
    pub const fn is_delivery(&self) -> bool {
        matches!(self, Self::Delivery(_) | Self::Interrupted)
    }
}

/// Executes a single notification.
///
/// This function:
/// 1. Builds the card from the configured message settings
/// 2. Prints it as JSON in dry-run mode, or
/// 3. Sends it with a [`TeamsClient`] until it succeeds, fails or Ctrl+C arrives
///
/// # Errors
///
/// Returns an error if the card is invalid or delivery fails.
///
/// # Coverage Note
///
/// Excluded from coverage because it performs real network I/O.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let card = build_card(&config.message)?;

    if config.dry_run {
        println!("{}", render_card(&card)?);
        tracing::info!("Dry-run mode: card printed, nothing sent");
        return Ok(());
    }

    let url = config.url.ok_or(RunError::NoDestination)?;
    let client = TeamsClient::with_client(ReqwestClient::new()).with_config(config.client);

    deliver(&client, url.as_str(), &card, shutdown_signal()).await
}

/// Builds the card described by `message`.
///
/// Facts go into a single section; actions are attached to the card.
fn build_card(message: &MessageSettings) -> Result<MessageCard, RunError> {
    let mut card = MessageCard::new();

    if let Some(ref title) = message.title {
        card = card.with_title(title);
    }
    if let Some(ref summary) = message.summary {
        card = card.with_summary(summary);
    }
    if let Some(ref color) = message.theme_color {
        card = card.with_theme_color(color);
    }
    if let Some(ref text) = message.text {
        card = card.with_text(format_text(text, message.text_format)?);
    }

    if !message.facts.is_empty() {
        let mut section = Section::new();
        section.add_fact(message.facts.iter().cloned())?;
        card.add_section([section]);
    }

    card.add_action(message.actions.iter().cloned());

    card.validate()?;
    Ok(card)
}

fn format_text(text: &str, format: TextFormat) -> Result<String, FormatError> {
    match format {
        TextFormat::Plain => Ok(text.to_string()),
        TextFormat::CodeBlock => format_as_code_block(text),
        TextFormat::CodeSnippet => format_as_code_snippet(text),
    }
}

/// Renders the card as indented JSON for dry-run output.
fn render_card(card: &MessageCard) -> Result<String, RunError> {
    serde_json::to_string_pretty(card).map_err(RunError::Serialization)
}

/// Sends `card`, abandoning the attempt if `shutdown` completes first.
async fn deliver<W, F>(webhook: &W, url: &str, card: &MessageCard, shutdown: F) -> Result<(), RunError>
where
    W: WebhookSender,
    F: Future<Output = ()>,
{
    tokio::select! {
        biased;

        () = shutdown => {
            tracing::warn!("Shutdown signal received, abandoning delivery");
            Err(RunError::Interrupted)
        }

        result = webhook.send(url, card) => {
            result?;
            tracing::info!("Card delivered");
            Ok(())
        }
    }
}

/// Returns a future that completes when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
