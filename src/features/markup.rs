//! Markup removal
//!
//! Flattens the remaining commands to plain text using the command tables
//! in [`crate::data::commands`], then turns escaped characters and TeX
//! spacing into their plain-text form.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::args::{get_tex_commands_args, TexCommand};
use crate::core::lexer::find_tex_commands_noargv;
use crate::data::commands::{command_role, CommandRole, SYMBOL_COMMANDS};

lazy_static! {
    // `\section*` and friends
    static ref STARRED_COMMAND: Regex = Regex::new(r"\\([A-Za-z]+)\*").unwrap();
}

/// Drop the star of starred commands so their arguments are scanned
pub fn normalize_starred(text: &str) -> Cow<'_, str> {
    STARRED_COMMAND.replace_all(text, r"\$1")
}

/// Flatten all commands in `text` to plain text
///
/// ```rust
/// use texstrip::features::markup::strip_commands;
///
/// assert_eq!(strip_commands(r"\textbf{50\%} off"), "50% off");
/// ```
pub fn strip_commands(text: &str) -> String {
    strip_markup(&normalize_starred(text))
}

fn strip_markup(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;

    for cmd in get_tex_commands_args(text) {
        output.push_str(&strip_bare(&text[copied..cmd.start]));
        output.push_str(&render_command(&cmd));
        copied = cmd.end;
    }

    output.push_str(&strip_bare(&text[copied..]));
    output
}

fn render_command(cmd: &TexCommand<'_>) -> String {
    let last = || cmd.last_required().map(strip_markup).unwrap_or_default();

    match command_role(cmd.name) {
        CommandRole::Text => last(),
        CommandRole::Heading => format!("\n\n{}\n\n", last().trim()),
        CommandRole::Footnote => format!(" ({})", last().trim()),
        CommandRole::Item => {
            let label = cmd
                .optional()
                .next()
                .map(strip_markup)
                .unwrap_or_else(|| "-".to_string());
            let body: String = cmd.required().map(strip_markup).collect();
            format!("{} {}", label.trim(), body)
        }
        CommandRole::Drop => String::new(),
        CommandRole::Generic => {
            let mut output = SYMBOL_COMMANDS
                .get(cmd.name)
                .map(|symbol| symbol.to_string())
                .unwrap_or_default();
            for arg in cmd.required() {
                output.push_str(&strip_markup(arg));
            }
            output
        }
    }
}

/// Text between bracketed commands: bare commands and escapes
fn strip_bare(gap: &str) -> String {
    let mut output = String::with_capacity(gap.len());
    let mut copied = 0;

    for span in find_tex_commands_noargv(gap) {
        output.push_str(&unescape(&gap[copied..span.start]));
        if let Some(symbol) = SYMBOL_COMMANDS.get(span.name(gap)) {
            output.push_str(symbol);
        }
        copied = span.end;
    }

    output.push_str(&unescape(&gap[copied..]));
    output
}

/// Plain-text form of escapes, ties, quotes and grouping braces
pub fn unescape(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped @ ('%' | '&' | '_' | '#' | '$' | '{' | '}')) => output.push(escaped),
                Some('\\') => {
                    // `\\[2pt]`
                    if chars.peek() == Some(&'[') {
                        let mut probe = chars.clone();
                        if probe.by_ref().any(|c| c == ']') {
                            chars = probe;
                        }
                    }
                    if chars.peek() != Some(&'\n') {
                        output.push('\n');
                    }
                }
                Some(',' | ';' | ':' | '>' | ' ' | '\t' | '\n') => output.push(' '),
                // discretionary hyphens, spacing corrections and accents
                Some('!' | '-' | '/' | '@' | '\'' | '"' | '^' | '`' | '~' | '=' | '.') => {}
                Some(letter) if letter.is_ascii_alphabetic() => {
                    while chars.peek().is_some_and(char::is_ascii_alphabetic) {
                        chars.next();
                    }
                }
                Some(other) => output.push(other),
                None => {}
            },
            '~' => output.push(' '),
            '{' | '}' => {}
            '`' if chars.peek() == Some(&'`') => {
                chars.next();
                output.push('"');
            }
            '\'' if chars.peek() == Some(&'\'') => {
                chars.next();
                output.push('"');
            }
            _ => output.push(c),
        }
    }

    output
}
