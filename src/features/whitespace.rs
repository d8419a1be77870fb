//! Whitespace normalization

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SPACE_RUN: Regex = Regex::new(r"[ \t]+").unwrap();
    static ref LINE_EDGE_SPACE: Regex = Regex::new(r"(?m)^ | $").unwrap();
    static ref BLANK_LINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Collapse space runs, trim every line, keep at most one blank line
/// between paragraphs and trim the whole text
pub fn normalize_whitespace(text: &str) -> String {
    let text = SPACE_RUN.replace_all(text, " ");
    let text = LINE_EDGE_SPACE.replace_all(&text, "");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collapse() {
        assert_eq!(
            normalize_whitespace("  a \t  b \n\n\n\n c  "),
            "a b\n\nc"
        );
    }

    #[test]
    fn test_single_newlines_kept() {
        assert_eq!(normalize_whitespace("one\ntwo\n\nthree"), "one\ntwo\n\nthree");
    }

    #[test]
    fn test_only_whitespace() {
        assert_eq!(normalize_whitespace(" \n\n \t"), "");
    }
}
