//! Error types for code formatting.

use thiserror::Error;

/// Error type for the code block/snippet formatters.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The input string was empty.
    #[error("Received empty string, refusing to format")]
    EmptyInput,

    /// The pretty-printed JSON was too short to strip its surrounding quotes.
    #[error("Formatted JSON has invalid length: got {len} chars, want at least {min} chars")]
    MalformedJson {
        /// Length of the formatted text
        len: usize,
        /// Minimum length required
        min: usize,
    },

    /// Encoding the input as a JSON string failed.
    #[error("Failed to encode input as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
