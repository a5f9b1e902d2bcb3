//! Safe-markup formatting for text embedded in cards.
//!
//! This module turns arbitrary strings into Markdown code fragments that
//! Teams renders verbatim:
//! - Multi-line code blocks ([`format_as_code_block`])
//! - Inline code snippets ([`format_as_code_snippet`])
//!
//! Input that is already JSON is pretty-printed without being re-escaped;
//! anything else is JSON-escaped first so control characters, quotes and
//! backslashes cannot break the surrounding card payload.

mod code;
mod error;

#[cfg(test)]
mod code_tests;

pub use code::{
    CODE_BLOCK_PREFIX, CODE_BLOCK_SUFFIX, CODE_SNIPPET_PREFIX, CODE_SNIPPET_SUFFIX,
    format_as_code_block, format_as_code_snippet,
};
pub use error::FormatError;
