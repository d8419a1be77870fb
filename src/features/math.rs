//! Math replacement
//!
//! Every math region becomes a protected placeholder:
//! - display environments (`equation`, `align*`, ...)
//! - `\[...\]` and `\(...\)`
//! - `$$...$$` and `$...$` (an escaped `\$` is plain text)

use std::ops::Range;

use tracing::debug;

use super::environments::{environment_name, matching_end};
use super::placeholders::PlaceholderStore;
use crate::core::args::get_tex_commands_args;
use crate::data::commands::MATH_ENVIRONMENTS;

/// Replace `ranges` (sorted, disjoint) of `text` by protected placeholders
fn splice_placeholders(
    text: &str,
    ranges: &[Range<usize>],
    placeholder: &str,
    store: &mut PlaceholderStore,
) -> String {
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;
    for range in ranges {
        output.push_str(&text[copied..range.start]);
        output.push_str(&store.protect(placeholder));
        copied = range.end;
    }
    output.push_str(&text[copied..]);
    output
}

/// Display-math environments at the top level of `text`
pub fn find_math_environments(text: &str) -> Vec<Range<usize>> {
    let commands = get_tex_commands_args(text);
    let mut ranges = Vec::new();
    let mut i = 0;
    while i < commands.len() {
        let cmd = &commands[i];
        i += 1;
        let Some(name) = environment_name(cmd, "begin") else {
            continue;
        };
        if !MATH_ENVIRONMENTS.contains(name) {
            continue;
        }
        match matching_end(&commands, i - 1, name) {
            Some(close) => {
                ranges.push(cmd.start..commands[close].end);
                i = close + 1;
            }
            None => ranges.push(cmd.start..text.len()),
        }
    }
    ranges
}

/// Offset of the next `pattern` at or after `from` whose backslash is not
/// itself escaped
fn find_unescaped(text: &str, from: usize, pattern: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut search = from;
    while let Some(found) = text[search..].find(pattern) {
        let at = search + found;
        let preceding = bytes[..at].iter().rev().take_while(|&&b| b == b'\\').count();
        if preceding % 2 == 0 {
            return Some(at);
        }
        search = at + 1;
    }
    None
}

/// `\[...\]` and `\(...\)` regions, outermost first
pub fn find_bracket_math(text: &str) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut pos = 0;
    loop {
        let display = find_unescaped(text, pos, "\\[").map(|at| (at, "\\]"));
        let inline = find_unescaped(text, pos, "\\(").map(|at| (at, "\\)"));
        let next = match (display, inline) {
            (Some(d), Some(i)) => Some(if d.0 < i.0 { d } else { i }),
            (d, i) => d.or(i),
        };
        let Some((open, close)) = next else { break };

        match find_unescaped(text, open + 2, close) {
            Some(end) => {
                ranges.push(open..end + close.len());
                pos = end + close.len();
            }
            None => {
                debug!(offset = open, "unterminated math region");
                pos = open + 2;
            }
        }
    }
    ranges
}

/// `$$...$$` and `$...$` regions
///
/// A `$` is escaped only by an odd run of backslashes, so the `$` after a
/// `\\` line break still opens math.
pub fn find_dollar_math(text: &str) -> Vec<Range<usize>> {
    let mut dollars = Vec::new();
    let mut pos = 0;
    while let Some(at) = find_unescaped(text, pos, "$") {
        dollars.push(at);
        pos = at + 1;
    }

    let pairs: Vec<(usize, usize)> = dollars
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect();
    let mut ranges = Vec::new();
    let mut i = 0;
    while i < pairs.len() {
        let (open, close) = pairs[i];
        i += 1;
        if close != open + 1 {
            ranges.push(open..close + 1);
            continue;
        }
        // `$$` opens display math, closed by the next empty pair
        if let Some(&(_, next_close)) = pairs
            .get(i)
            .filter(|(next_open, next_close)| *next_close == *next_open + 1)
        {
            ranges.push(open..next_close + 1);
            i += 1;
        }
    }
    ranges
}

/// Replace all math in `text` by `placeholder`
pub fn replace_math(text: &str, placeholder: &str, store: &mut PlaceholderStore) -> String {
    let before = store.len();
    let text = splice_placeholders(text, &find_math_environments(text), placeholder, store);
    let text = splice_placeholders(&text, &find_bracket_math(&text), placeholder, store);
    let text = splice_placeholders(&text, &find_dollar_math(&text), placeholder, store);
    debug!(regions = store.len() - before, "replaced math");
    text
}
