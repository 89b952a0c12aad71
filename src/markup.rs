//! Removal of angle-bracket markup fragments from raw input lines.

use std::{borrow::Cow, sync::OnceLock};

use regex::Regex;

static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

fn tag_pattern() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"))
}

/// Strips every `<...>` fragment from `line` and trims surrounding whitespace.
///
/// Borrows from the input when the line carries no markup. An unterminated `<`
/// is left in place since it does not form a tag.
pub fn strip(line: &str) -> Cow<'_, str> {
    let pattern = tag_pattern();
    if pattern.is_match(line) {
        let cleaned = pattern.replace_all(line, "");
        Cow::Owned(cleaned.trim().to_string())
    } else {
        Cow::Borrowed(line.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_wrapping_paragraph_tags() {
        assert_eq!(strip("<p>{\"a\":1}</p>\n"), "{\"a\":1}");
    }

    #[test]
    fn removes_tags_between_tokens() {
        assert_eq!(strip("{\"a\":<b>1</b>,<br/>\"b\":2}"), "{\"a\":1,\"b\":2}");
    }

    #[test]
    fn leaves_unterminated_bracket() {
        assert_eq!(strip("  a < b  "), "a < b");
    }

    #[test]
    fn borrows_when_nothing_to_remove() {
        assert!(matches!(strip("{\"a\":1}"), Cow::Borrowed(_)));
    }

    #[test]
    fn empty_tag_is_removed() {
        assert_eq!(strip("<>x<>"), "x");
    }
}
