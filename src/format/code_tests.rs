//! Tests for the code block and code snippet formatters.

use super::FormatError;
use super::code::{indent_json, wrap_code};
use super::{
    CODE_BLOCK_PREFIX, CODE_BLOCK_SUFFIX, CODE_SNIPPET_PREFIX, CODE_SNIPPET_SUFFIX,
    format_as_code_block, format_as_code_snippet,
};

/// Strips the code block fence and returns the interior.
fn block_interior(block: &str) -> &str {
    block
        .strip_prefix(CODE_BLOCK_PREFIX)
        .and_then(|s| s.strip_suffix(CODE_BLOCK_SUFFIX))
        .expect("block should be fenced")
}

mod empty_input {
    use super::*;

    #[test]
    fn code_block_rejects_empty_string() {
        assert!(matches!(
            format_as_code_block(""),
            Err(FormatError::EmptyInput)
        ));
    }

    #[test]
    fn code_snippet_rejects_empty_string() {
        assert!(matches!(
            format_as_code_snippet(""),
            Err(FormatError::EmptyInput)
        ));
    }
}

mod plain_text {
    use super::*;

    #[test]
    fn code_block_wraps_plain_text() {
        let block = format_as_code_block("disk usage at 93%").unwrap();
        assert_eq!(block, "\n```\ndisk usage at 93%\n```\n");
    }

    #[test]
    fn code_snippet_wraps_plain_text() {
        let snippet = format_as_code_snippet("systemctl restart nginx").unwrap();
        assert_eq!(snippet, "`systemctl restart nginx`");
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        let snippet = format_as_code_snippet(r#"path "C:\temp""#).unwrap();
        assert_eq!(snippet, r#"`path \"C:\\temp\"`"#);
    }

    #[test]
    fn control_characters_are_escaped() {
        let block = format_as_code_block("line one\nline two\ttabbed").unwrap();
        assert_eq!(block_interior(&block), r"line one\nline two\ttabbed");
    }

    #[test]
    fn interior_parses_back_to_original() {
        let inputs = [
            "plain",
            "with \"quotes\"",
            "back\\slash",
            "multi\nline\r\nwindows",
            "unicode: café ✓",
            "{not json",
            "  padded  ",
        ];

        for input in inputs {
            let block = format_as_code_block(input).unwrap();
            let interior = block_interior(&block);
            let decoded: String = serde_json::from_str(&format!("\"{interior}\"")).unwrap();
            assert_eq!(decoded, input, "round trip failed for {input:?}");
        }
    }

    #[test]
    fn single_character_is_wrapped() {
        assert_eq!(format_as_code_snippet("x").unwrap(), "`x`");
    }
}

mod json_input {
    use super::*;

    #[test]
    fn object_is_pretty_printed_not_re_escaped() {
        let block = format_as_code_block(r#"{"status":"down","code":503}"#).unwrap();
        assert_eq!(
            block_interior(&block),
            "{\n\t\"status\": \"down\",\n\t\"code\": 503\n}"
        );
    }

    #[test]
    fn nested_structures_are_indented() {
        let block = format_as_code_block(r#"{"hosts":["a","b"],"meta":{"n":2}}"#).unwrap();
        let expected = "{\n\t\"hosts\": [\n\t\t\"a\",\n\t\t\"b\"\n\t],\n\t\"meta\": {\n\t\t\"n\": 2\n\t}\n}";
        assert_eq!(block_interior(&block), expected);
    }

    #[test]
    fn quoted_json_string_loses_its_quotes() {
        let snippet = format_as_code_snippet(r#""already quoted""#).unwrap();
        assert_eq!(snippet, "`already quoted`");
    }

    #[test]
    fn existing_escapes_are_kept_verbatim() {
        let snippet = format_as_code_snippet(r#""tab\there \u0041""#).unwrap();
        assert_eq!(snippet, r"`tab\there \u0041`");
    }

    #[test]
    fn number_is_wrapped_as_is() {
        assert_eq!(format_as_code_snippet("42").unwrap(), "`42`");
        assert_eq!(format_as_code_snippet("1e3").unwrap(), "`1e3`");
    }

    #[test]
    fn literals_are_wrapped_as_is() {
        assert_eq!(format_as_code_snippet("true").unwrap(), "`true`");
        assert_eq!(format_as_code_snippet("null").unwrap(), "`null`");
    }
}

mod indentation {
    use super::*;

    #[test]
    fn empty_containers_stay_compact() {
        assert_eq!(indent_json("{}", "\t"), "{}");
        assert_eq!(indent_json("[ ]", "\t"), "[]");
        assert_eq!(
            indent_json(r#"{"a":[],"b":{}}"#, "\t"),
            "{\n\t\"a\": [],\n\t\"b\": {}\n}"
        );
    }

    #[test]
    fn existing_whitespace_is_replaced() {
        let src = "{\n    \"a\" :   1 ,\n  \"b\":2 }";
        assert_eq!(indent_json(src, "\t"), "{\n\t\"a\": 1,\n\t\"b\": 2\n}");
    }

    #[test]
    fn structural_characters_inside_strings_are_ignored() {
        let src = r#"{"k":"a, b: {c} [d] \"e\""}"#;
        assert_eq!(
            indent_json(src, "\t"),
            "{\n\t\"k\": \"a, b: {c} [d] \\\"e\\\"\"\n}"
        );
    }

    #[test]
    fn number_literals_are_copied_verbatim() {
        assert_eq!(
            indent_json(r#"{"n":1.5e3,"m":-0.10}"#, "\t"),
            "{\n\t\"n\": 1.5e3,\n\t\"m\": -0.10\n}"
        );
    }

    #[test]
    fn custom_indent_unit_is_used() {
        assert_eq!(indent_json("[1,2]", "  "), "[\n  1,\n  2\n]");
    }
}

mod quote_normalization {
    use super::*;

    #[test]
    fn unquoted_content_is_wrapped_whole() {
        let wrapped = wrap_code("{}", CODE_SNIPPET_PREFIX, CODE_SNIPPET_SUFFIX).unwrap();
        assert_eq!(wrapped, "`{}`");
    }

    #[test]
    fn fully_quoted_content_is_stripped() {
        let wrapped = wrap_code("\"abc\"", CODE_SNIPPET_PREFIX, CODE_SNIPPET_SUFFIX).unwrap();
        assert_eq!(wrapped, "`abc`");
    }

    #[test]
    fn missing_leading_quote_drops_trailing_quote_and_wraps_both_sides() {
        let wrapped = wrap_code("abc\"", CODE_SNIPPET_PREFIX, CODE_SNIPPET_SUFFIX).unwrap();
        assert_eq!(wrapped, "`abc`");
    }

    #[test]
    fn missing_trailing_quote_drops_leading_quote_and_wraps_both_sides() {
        let wrapped = wrap_code("\"abc", CODE_BLOCK_PREFIX, CODE_BLOCK_SUFFIX).unwrap();
        assert_eq!(wrapped, "\n```\nabc\n```\n");
    }

    #[test]
    fn lone_quote_is_malformed() {
        let result = wrap_code("\"", CODE_SNIPPET_PREFIX, CODE_SNIPPET_SUFFIX);
        assert!(matches!(
            result,
            Err(FormatError::MalformedJson { len: 1, min: 2 })
        ));
    }

    #[test]
    fn empty_quoted_string_yields_empty_fence() {
        let wrapped = wrap_code("\"\"", CODE_SNIPPET_PREFIX, CODE_SNIPPET_SUFFIX).unwrap();
        assert_eq!(wrapped, "``");
    }
}
