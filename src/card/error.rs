//! Error types for card construction.

use thiserror::Error;

/// Error type for card validation.
///
/// Raised when a value is added to a card, never at serialization time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    /// A fact had an empty name.
    #[error("Empty name field received for fact #{index}")]
    EmptyFactName {
        /// Position of the fact within the call
        index: usize,
    },

    /// A fact had an empty value.
    #[error("Empty value field received for fact #{index} ('{name}')")]
    EmptyFactValue {
        /// Position of the fact within the call
        index: usize,
        /// Name of the offending fact
        name: String,
    },

    /// A key/value fact was requested with an empty key.
    #[error("Empty key received for new fact")]
    EmptyKey,

    /// A key/value fact was requested without any values.
    #[error("No values received for new fact '{key}'")]
    NoValues {
        /// The fact key
        key: String,
    },

    /// An image had an empty URL.
    #[error("Cannot add image #{index}: empty image URL")]
    EmptyImageUrl {
        /// Position of the image within the call
        index: usize,
    },

    /// An image had an empty title.
    #[error("Cannot add image #{index}: empty image title")]
    EmptyImageTitle {
        /// Position of the image within the call
        index: usize,
    },

    /// The hero image URL was empty.
    #[error("Cannot add empty hero image URL")]
    EmptyHeroImageUrl,

    /// The hero image title was empty.
    #[error("Cannot add empty hero image title")]
    EmptyHeroImageTitle,

    /// The card has neither text nor summary, which Teams rejects.
    #[error("Card must have a text or summary field")]
    MissingTextOrSummary,
}
