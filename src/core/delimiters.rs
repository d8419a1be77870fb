//! Symmetric delimiter pairs
//!
//! Finds regions enclosed by a pair of single characters, such as inline
//! math `$...$`. Pairs never nest and are matched greedily from left to
//! right.

/// Offsets of the opening and closing delimiter characters of one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DelimiterSpan {
    pub open: usize,
    pub close: usize,
}

impl DelimiterSpan {
    /// Text strictly between the two delimiters
    pub fn inner<'a>(&self, text: &'a str, open_char: char) -> &'a str {
        &text[self.open + open_char.len_utf8()..self.close]
    }
}

impl From<DelimiterSpan> for (usize, usize) {
    fn from(span: DelimiterSpan) -> Self {
        (span.open, span.close)
    }
}

/// Find every `open ... close` region in `text`
///
/// - A close seen before any open is ignored.
/// - An open seen inside a region is ignored (no nesting).
/// - A trailing open without a close yields nothing.
/// - With `ignore_escape`, a delimiter directly preceded by `\` is treated as
///   ordinary text.
///
/// ```rust
/// use texstrip::core::delimiters::find_tex_command_char;
///
/// assert!(find_tex_command_char(r"$formula\$", ('$', '$'), true).is_empty());
/// assert_eq!(find_tex_command_char(r"$formula\$$", ('$', '$'), true).len(), 1);
/// ```
pub fn find_tex_command_char(
    text: &str,
    delimiters: (char, char),
    ignore_escape: bool,
) -> Vec<DelimiterSpan> {
    let (open_char, close_char) = delimiters;
    let mut spans = Vec::new();
    let mut pending: Option<usize> = None;
    let mut prev: Option<char> = None;

    for (i, c) in text.char_indices() {
        let escaped = ignore_escape && prev == Some('\\');
        prev = Some(c);
        if escaped {
            continue;
        }

        match pending {
            Some(open) if c == close_char => {
                spans.push(DelimiterSpan { open, close: i });
                pending = None;
            }
            None if c == open_char => pending = Some(i),
            _ => {}
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str, delims: (char, char), ignore_escape: bool) -> Vec<(usize, usize)> {
        find_tex_command_char(text, delims, ignore_escape)
            .into_iter()
            .map(Into::into)
            .collect()
    }

    #[test]
    fn test_inline_math() {
        let text = "a $x$ and $y^2$.";
        assert_eq!(pairs(text, ('$', '$'), true), vec![(2, 4), (10, 14)]);
    }

    #[test]
    fn test_escaped_close() {
        assert!(pairs(r"$formula\$", ('$', '$'), true).is_empty());
        assert_eq!(pairs(r"$formula\$$", ('$', '$'), true), vec![(0, 10)]);
    }

    #[test]
    fn test_escape_not_ignored() {
        assert_eq!(pairs(r"$formula\$", ('$', '$'), false), vec![(0, 9)]);
    }

    #[test]
    fn test_distinct_delimiters() {
        let text = ") (a (b) c)";
        assert_eq!(pairs(text, ('(', ')'), false), vec![(2, 7)]);
    }

    #[test]
    fn test_unterminated_trailing_open() {
        assert_eq!(pairs("$a$ $b", ('$', '$'), true), vec![(0, 2)]);
    }

    #[test]
    fn test_multibyte_delimiters() {
        let text = "«é» x «y»";
        let spans = find_tex_command_char(text, ('«', '»'), false);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].inner(text, '«'), "é");
        assert_eq!(spans[1].inner(text, '«'), "y");
    }
}
