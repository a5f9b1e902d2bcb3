//! The top-level MessageCard document.

use serde::Serialize;
use tracing::{debug, warn};

use super::{CardError, MAX_POTENTIAL_ACTIONS, PotentialAction, Section};

/// A legacy Office 365 connector card.
///
/// Built once per notification, then handed to
/// [`WebhookSender::send`](crate::webhook::WebhookSender::send), which serializes
/// it to the MessageCard JSON format.
///
/// # Example
///
/// ```
/// use teams_notify::card::{Fact, MessageCard, Section};
///
/// let mut section = Section::new().with_title("Details");
/// section.add_fact([Fact::new("Host", "db-1")]).unwrap();
///
/// let mut card = MessageCard::simple("Backup failed", "Nightly backup exited with code 2");
/// card.add_section([section]);
///
/// let json = card.to_json().unwrap();
/// assert!(json.contains("\"@type\":\"MessageCard\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCard {
    #[serde(rename = "@type")]
    card_type: &'static str,

    #[serde(rename = "@context")]
    context: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    theme_color: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    sections: Vec<Section>,

    #[serde(rename = "potentialAction", skip_serializing_if = "Vec::is_empty")]
    potential_actions: Vec<PotentialAction>,
}

impl Default for MessageCard {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageCard {
    /// Value of the `@type` field.
    pub const CARD_TYPE: &'static str = "MessageCard";

    /// Value of the `@context` field.
    pub const CONTEXT: &'static str = "https://schema.org/extensions";

    /// Creates an empty card.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            card_type: Self::CARD_TYPE,
            context: Self::CONTEXT,
            summary: None,
            title: None,
            text: None,
            theme_color: None,
            sections: Vec::new(),
            potential_actions: Vec::new(),
        }
    }

    /// Creates a card with a title and body text.
    #[must_use]
    pub fn simple(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new().with_title(title).with_text(text)
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the body text (Markdown).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the summary shown in notifications and activity feeds.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Sets the accent color as a hex string such as `"FF0000"`.
    #[must_use]
    pub fn with_theme_color(mut self, color: impl Into<String>) -> Self {
        self.theme_color = Some(color.into());
        self
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the body text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the summary.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Returns the theme color.
    #[must_use]
    pub fn theme_color(&self) -> Option<&str> {
        self.theme_color.as_deref()
    }

    /// Returns the sections in insertion order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns the card-level actions in insertion order.
    #[must_use]
    pub fn potential_actions(&self) -> &[PotentialAction] {
        &self.potential_actions
    }

    /// Appends one or more sections.
    // TODO: reject sections with no title, text, facts or images once Teams'
    // handling of empty sections is confirmed.
    pub fn add_section(&mut self, sections: impl IntoIterator<Item = Section>) {
        let before = self.sections.len();
        self.sections.extend(sections);
        debug!(
            added = self.sections.len() - before,
            total = self.sections.len(),
            "Added sections to card"
        );
    }

    /// Appends one or more card-level actions.
    ///
    /// Teams renders at most [`MAX_POTENTIAL_ACTIONS`] actions; exceeding
    /// that logs a warning but still adds them.
    pub fn add_action(&mut self, actions: impl IntoIterator<Item = PotentialAction>) {
        self.potential_actions.extend(actions);

        if self.potential_actions.len() > MAX_POTENTIAL_ACTIONS {
            warn!(
                count = self.potential_actions.len(),
                max = MAX_POTENTIAL_ACTIONS,
                "Card has more potential actions than Teams renders"
            );
        }
    }

    /// Checks the fields Teams requires before accepting a card.
    ///
    /// # Errors
    ///
    /// Returns [`CardError::MissingTextOrSummary`] if both `text` and
    /// `summary` are unset or empty.
    pub fn validate(&self) -> Result<(), CardError> {
        let has_text = self.text.as_deref().is_some_and(|t| !t.is_empty());
        let has_summary = self.summary.as_deref().is_some_and(|s| !s.is_empty());

        if has_text || has_summary {
            Ok(())
        } else {
            Err(CardError::MissingTextOrSummary)
        }
    }

    /// Serializes the card to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the card to JSON bytes for the request body.
    pub(crate) fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
