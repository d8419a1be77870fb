//! Environment handling
//!
//! Ignored environments (`verbatim`, `tabular`, `tikzpicture`, ...) are
//! removed together with their content. Display-math environments are left
//! intact for the math stage. For every other environment only the
//! `\begin{...}` and `\end{...}` markers go away.

use tracing::debug;

use crate::core::args::{get_tex_commands_args, TexCommand};
use crate::data::commands::MATH_ENVIRONMENTS;

const DOCUMENT_BEGIN: &str = "\\begin{document}";
const DOCUMENT_END: &str = "\\end{document}";

/// Name of the environment opened (`marker == "begin"`) or closed by `cmd`
pub(crate) fn environment_name<'a>(cmd: &TexCommand<'a>, marker: &str) -> Option<&'a str> {
    if cmd.name != marker {
        return None;
    }
    cmd.first_required().map(str::trim)
}

/// Index of the `\end` matching the `\begin` at `commands[open]`
///
/// Nested environments of the same name are skipped.
pub(crate) fn matching_end(commands: &[TexCommand<'_>], open: usize, name: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, cmd) in commands.iter().enumerate().skip(open + 1) {
        if environment_name(cmd, "begin") == Some(name) {
            depth += 1;
        } else if environment_name(cmd, "end") == Some(name) {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

/// Keep only the body of a full document
///
/// Text without `\begin{document}` is returned unchanged.
pub fn extract_document_body(text: &str) -> &str {
    let Some(begin) = text.find(DOCUMENT_BEGIN) else {
        return text;
    };
    let body = &text[begin + DOCUMENT_BEGIN.len()..];
    match body.find(DOCUMENT_END) {
        Some(end) => &body[..end],
        None => body,
    }
}

/// Remove ignored environments and all other environment markers
pub fn strip_environments<S: AsRef<str>>(text: &str, ignored: &[S]) -> String {
    let is_ignored = |name: &str| ignored.iter().any(|env| env.as_ref() == name);
    let output = strip_in(text, &is_ignored);
    debug!(
        before = text.len(),
        after = output.len(),
        "stripped environments"
    );
    output
}

fn strip_in(text: &str, is_ignored: &dyn Fn(&str) -> bool) -> String {
    let commands = get_tex_commands_args(text);
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < commands.len() {
        let cmd = &commands[i];
        output.push_str(&text[copied..cmd.start]);
        copied = cmd.end;
        i += 1;

        if let Some(name) = environment_name(cmd, "begin") {
            let close = matching_end(&commands, i - 1, name);
            if is_ignored(name) {
                match close {
                    Some(close) => {
                        copied = commands[close].end;
                        i = close + 1;
                    }
                    None => {
                        debug!(name, "unterminated ignored environment");
                        copied = text.len();
                        i = commands.len();
                    }
                }
            } else if MATH_ENVIRONMENTS.contains(name) {
                let end = close.map_or(cmd.end, |close| commands[close].end);
                output.push_str(&text[cmd.start..end]);
                copied = end;
                if let Some(close) = close {
                    i = close + 1;
                }
            }
            continue;
        }
        if cmd.name == "end" {
            continue;
        }

        let mut pos = cmd.start;
        for arg in &cmd.arguments {
            output.push_str(&text[pos..arg.offset]);
            output.push_str(&strip_in(arg.text, is_ignored));
            pos = arg.offset + arg.text.len();
        }
        output.push_str(&text[pos..cmd.end]);
    }

    output.push_str(&text[copied..]);
    output
}
