//! Potential actions (buttons) attached to cards and sections.

use serde::Serialize;

/// A button rendered at the bottom of a card or section.
///
/// Serialized with an `@type` discriminator as expected by the
/// MessageCard format.
///
/// # Example
///
/// ```
/// use teams_notify::card::PotentialAction;
///
/// let action = PotentialAction::open_uri("View run", "https://ci.example.com/runs/42");
/// assert_eq!(action.name(), "View run");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "@type")]
pub enum PotentialAction {
    /// Opens one of the given URIs, chosen by client OS.
    OpenUri {
        /// Button label
        name: String,
        /// Candidate URIs
        targets: Vec<OpenUriTarget>,
    },

    /// Makes an HTTP POST request from the Teams service.
    #[serde(rename = "HttpPOST", rename_all = "camelCase")]
    HttpPost {
        /// Button label
        name: String,
        /// URL receiving the POST
        target: String,
        /// Request body
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<String>,
        /// Content type of `body`
        #[serde(skip_serializing_if = "Option::is_none")]
        body_content_type: Option<String>,
    },
}

/// A URI target of an [`PotentialAction::OpenUri`] action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenUriTarget {
    /// Client OS the URI applies to (`default`, `iOS`, `android`, `windows`)
    pub os: String,
    /// URI to open
    pub uri: String,
}

impl OpenUriTarget {
    /// OS value matching every client.
    pub const DEFAULT_OS: &'static str = "default";
}

impl PotentialAction {
    /// Creates an `OpenUri` action with a single target for all clients.
    #[must_use]
    pub fn open_uri(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::OpenUri {
            name: name.into(),
            targets: vec![OpenUriTarget {
                os: OpenUriTarget::DEFAULT_OS.to_string(),
                uri: uri.into(),
            }],
        }
    }

    /// Creates an `HttpPOST` action without a body.
    #[must_use]
    pub fn http_post(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::HttpPost {
            name: name.into(),
            target: target.into(),
            body: None,
            body_content_type: None,
        }
    }

    /// Returns the button label.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::OpenUri { name, .. } | Self::HttpPost { name, .. } => name,
        }
    }
}
