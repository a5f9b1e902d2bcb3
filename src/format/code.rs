//! Code block and code snippet formatting.

use serde::de::IgnoredAny;
use tracing::{debug, warn};

use super::FormatError;

/// Prefix marking text as a code block.
///
/// Teams itself collapses the surrounding newlines, but other MessageCard
/// renderers need them to recognize the fence.
pub const CODE_BLOCK_PREFIX: &str = "\n```\n";

/// Suffix closing a code block.
pub const CODE_BLOCK_SUFFIX: &str = "\n```\n";

/// Prefix marking text as an inline code snippet.
pub const CODE_SNIPPET_PREFIX: &str = "`";

/// Suffix closing an inline code snippet.
pub const CODE_SNIPPET_SUFFIX: &str = "`";

/// Indentation unit used when pretty-printing JSON.
const INDENT: &str = "\t";

/// Minimum length of a quoted string that can have its quotes stripped.
const MIN_QUOTED_LEN: usize = 2;

/// Formats `input` as a multi-line Markdown code block.
///
/// # Errors
///
/// Returns [`FormatError::EmptyInput`] if `input` is empty.
///
/// # Example
///
/// ```
/// use teams_notify::format::format_as_code_block;
///
/// let block = format_as_code_block("disk full").unwrap();
/// assert_eq!(block, "\n```\ndisk full\n```\n");
/// ```
pub fn format_as_code_block(input: &str) -> Result<String, FormatError> {
    format_as_code(input, CODE_BLOCK_PREFIX, CODE_BLOCK_SUFFIX)
}

/// Formats `input` as a single-line Markdown code snippet.
///
/// # Errors
///
/// Returns [`FormatError::EmptyInput`] if `input` is empty.
///
/// # Example
///
/// ```
/// use teams_notify::format::format_as_code_snippet;
///
/// let snippet = format_as_code_snippet("say \"hi\"").unwrap();
/// assert_eq!(snippet, r#"`say \"hi\"`"#);
/// ```
pub fn format_as_code_snippet(input: &str) -> Result<String, FormatError> {
    format_as_code(input, CODE_SNIPPET_PREFIX, CODE_SNIPPET_SUFFIX)
}

fn format_as_code(input: &str, prefix: &str, suffix: &str) -> Result<String, FormatError> {
    if input.is_empty() {
        return Err(FormatError::EmptyInput);
    }

    // JSON input is kept byte-for-byte so it is never escaped twice
    let encoded = if is_valid_json(input) {
        debug!(input, "Input is already valid JSON, keeping it as-is");
        input.to_string()
    } else {
        debug!(input, "Input is not valid JSON, encoding it as a JSON string");
        serde_json::to_string(input)?
    };

    let formatted = indent_json(&encoded, INDENT);
    debug!(formatted = %formatted, "Pretty-printed JSON");

    let wrapped = wrap_code(&formatted, prefix, suffix)?;
    debug!(wrapped = %wrapped, "Code content ready for submission");

    Ok(wrapped)
}

fn is_valid_json(input: &str) -> bool {
    serde_json::from_str::<IgnoredAny>(input).is_ok()
}

/// Re-indents already valid JSON text.
///
/// Only insignificant whitespace is touched: string contents, escape
/// sequences, numbers and key order are copied through unchanged. Empty
/// objects and arrays stay compact (`{}`, `[]`) and object keys are followed
/// by `": "`.
///
/// `serde_json::ser::PrettyFormatter` is not used here: it serializes parsed
/// values, which rewrites number literals (`1.5e3` becomes `1500.0`).
pub(super) fn indent_json(src: &str, indent: &str) -> String {
    let mut out = String::with_capacity(src.len() * 2);
    let mut depth: usize = 0;
    let mut need_indent = false;
    let mut in_string = false;
    let mut escaped = false;

    for c in src.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        if matches!(c, ' ' | '\t' | '\n' | '\r') {
            continue;
        }

        if need_indent && c != '}' && c != ']' {
            need_indent = false;
            depth += 1;
            push_newline(&mut out, indent, depth);
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '{' | '[' => {
                need_indent = true;
                out.push(c);
            }
            ',' => {
                out.push(c);
                push_newline(&mut out, indent, depth);
            }
            ':' => out.push_str(": "),
            '}' | ']' => {
                if need_indent {
                    // Empty container: keep it on one line
                    need_indent = false;
                } else {
                    depth = depth.saturating_sub(1);
                    push_newline(&mut out, indent, depth);
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

fn push_newline(out: &mut String, indent: &str, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(indent);
    }
}

/// Normalizes the surrounding quotes of `formatted` and wraps it.
///
/// A JSON-encoded string loses exactly one leading and one trailing quote.
/// When only one end carries a quote, that stray quote is dropped and the
/// rest is wrapped with both `prefix` and `suffix`.
pub(super) fn wrap_code(formatted: &str, prefix: &str, suffix: &str) -> Result<String, FormatError> {
    let leading = formatted.starts_with('"');
    let trailing = formatted.ends_with('"');

    let content = match (leading, trailing) {
        (false, false) => formatted,
        (false, true) => {
            warn!(formatted, "Formatted JSON is missing its leading double-quote");
            &formatted[..formatted.len() - 1]
        }
        (true, false) => {
            warn!(formatted, "Formatted JSON is missing its trailing double-quote");
            &formatted[1..]
        }
        (true, true) => {
            if formatted.len() < MIN_QUOTED_LEN {
                return Err(FormatError::MalformedJson {
                    len: formatted.len(),
                    min: MIN_QUOTED_LEN,
                });
            }
            &formatted[1..formatted.len() - 1]
        }
    };

    Ok(format!("{prefix}{content}{suffix}"))
}
