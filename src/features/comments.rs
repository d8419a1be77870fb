//! Comment removal
//!
//! Strips `%` line comments (keeping escaped `\%`) and
//! `\begin{comment} ... \end{comment}` blocks.

const COMMENT_BEGIN: &str = "\\begin{comment}";
const COMMENT_END: &str = "\\end{comment}";

/// Offset of the first unescaped `%` in `line`
fn comment_start(line: &str) -> Option<usize> {
    let mut chars = line.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '%' => return Some(i),
            _ => {}
        }
    }
    None
}

/// Remove `%` comments
///
/// A line holding nothing but a comment disappears entirely; a trailing
/// comment is cut and the line break kept.
pub fn remove_line_comments(text: &str) -> String {
    let mut output = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        let Some(start) = comment_start(line) else {
            output.push_str(line);
            continue;
        };

        let before = &line[..start];
        if before.trim().is_empty() {
            continue;
        }
        output.push_str(before.trim_end());
        if line.ends_with('\n') {
            output.push('\n');
        }
    }

    output
}

/// Remove `comment` environments with their content
///
/// An unterminated block runs to the end of the text.
pub fn remove_comment_environments(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(begin) = rest.find(COMMENT_BEGIN) {
        output.push_str(&rest[..begin]);
        let body = &rest[begin + COMMENT_BEGIN.len()..];
        rest = match body.find(COMMENT_END) {
            Some(end) => &body[end + COMMENT_END.len()..],
            None => "",
        };
    }

    output.push_str(rest);
    output
}

/// Remove every kind of comment
pub fn remove_comments(text: &str) -> String {
    remove_comment_environments(&remove_line_comments(text))
}
