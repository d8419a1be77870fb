//! Argument extraction
//!
//! Turns the raw spans of the [lexer](super::lexer) into one structured
//! record per command invocation, e.g. `\cite[p. 4]{knuth}` becomes
//! `("cite", [("p. 4", optional), ("knuth", required)])`.

use std::ops::Range;

use super::lexer::{find_tex_commands, CommandSpan, GroupKind};

/// One argument group of a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Argument<'a> {
    /// Argument text without the enclosing brackets
    pub text: &'a str,
    /// Group opened with `[`
    pub optional: bool,
    /// Offset of the first byte of `text`
    pub offset: usize,
}

/// A command invocation with all of its argument groups
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TexCommand<'a> {
    /// Command name without the backslash
    pub name: &'a str,
    pub arguments: Vec<Argument<'a>>,
    /// Offset of the backslash
    pub start: usize,
    /// One past the last closing bracket
    pub end: usize,
}

impl<'a> TexCommand<'a> {
    /// Byte range of the whole invocation, for splicing replacements back
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Mandatory (`{...}`) arguments in order
    pub fn required(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.arguments
            .iter()
            .filter(|arg| !arg.optional)
            .map(|arg| arg.text)
    }

    /// Optional (`[...]`) arguments in order
    pub fn optional(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.arguments
            .iter()
            .filter(|arg| arg.optional)
            .map(|arg| arg.text)
    }

    pub fn first_required(&self) -> Option<&'a str> {
        self.required().next()
    }

    pub fn last_required(&self) -> Option<&'a str> {
        self.required().last()
    }
}

/// Extract every top-level command with its arguments
///
/// ```rust
/// use texstrip::core::args::get_tex_commands_args;
///
/// let commands = get_tex_commands_args(r"See \cite[p.~4]{knuth}.");
/// assert_eq!(commands.len(), 1);
/// assert_eq!(commands[0].name, "cite");
/// assert_eq!(commands[0].arguments[0].text, "p.~4");
/// assert!(commands[0].arguments[0].optional);
/// assert_eq!(commands[0].range(), 4..22);
/// ```
pub fn get_tex_commands_args(text: &str) -> Vec<TexCommand<'_>> {
    group_command_spans(text, &find_tex_commands(text))
}

/// Group pre-computed spans into command records
///
/// `spans` must come from [`find_tex_commands`] on the same text.
pub fn group_command_spans<'a>(text: &'a str, spans: &[CommandSpan]) -> Vec<TexCommand<'a>> {
    let mut commands = Vec::new();
    let mut current: Option<TexCommand<'a>> = None;

    for span in spans {
        let command = current.get_or_insert_with(|| TexCommand {
            name: span.name(text),
            arguments: Vec::new(),
            start: span.command_start,
            end: span.end(),
        });
        command.arguments.push(Argument {
            text: span.argument(text),
            optional: span.kind == GroupKind::Bracket,
            offset: span.arg_start,
        });
        command.end = span.end();

        if !span.continues {
            commands.extend(current.take());
        }
    }
    commands.extend(current);

    commands
}

/// Visit every command, outer commands before the ones nested in their
/// arguments, in document order
pub fn visit_commands<F>(text: &str, visitor: &mut F)
where
    F: FnMut(&TexCommand<'_>),
{
    for command in get_tex_commands_args(text) {
        visitor(&command);
        for arg in &command.arguments {
            visit_commands(arg.text, visitor);
        }
    }
}

/// Rewrite commands anywhere in `text`, including inside arguments
///
/// `rewrite` is called for every command in document order. Returning
/// `Some` replaces the whole invocation; returning `None` keeps the command
/// and descends into its arguments.
///
/// ```rust
/// use texstrip::core::args::rewrite_commands;
///
/// let out = rewrite_commands(r"\emph{see \ref{x}}", &mut |cmd| {
///     (cmd.name == "ref").then(|| "1".to_string())
/// });
/// assert_eq!(out, r"\emph{see 1}");
/// ```
pub fn rewrite_commands<F>(text: &str, rewrite: &mut F) -> String
where
    F: FnMut(&TexCommand<'_>) -> Option<String>,
{
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;

    for command in get_tex_commands_args(text) {
        output.push_str(&text[copied..command.start]);
        match rewrite(&command) {
            Some(replacement) => output.push_str(&replacement),
            None => {
                let mut pos = command.start;
                for arg in &command.arguments {
                    output.push_str(&text[pos..arg.offset]);
                    output.push_str(&rewrite_commands(arg.text, rewrite));
                    pos = arg.offset + arg.text.len();
                }
                output.push_str(&text[pos..command.end]);
            }
        }
        copied = command.end;
    }

    output.push_str(&text[copied..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_argument() {
        let commands = get_tex_commands_args(r"Hello \textbf{world}!");
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "textbf");
        assert_eq!(
            commands[0].arguments,
            vec![Argument {
                text: "world",
                optional: false,
                offset: 14,
            }]
        );
        assert_eq!(commands[0].range(), 6..20);
    }

    #[test]
    fn test_multiple_arguments_grouped() {
        let text = r"\f{A}[B] and \g{C}";
        let commands = get_tex_commands_args(text);
        assert_eq!(commands.len(), 2);

        assert_eq!(commands[0].name, "f");
        assert_eq!(commands[0].arguments.len(), 2);
        assert!(!commands[0].arguments[0].optional);
        assert!(commands[0].arguments[1].optional);
        assert_eq!(&text[commands[0].range()], r"\f{A}[B]");

        assert_eq!(commands[1].name, "g");
        assert_eq!(&text[commands[1].range()], r"\g{C}");
    }

    #[test]
    fn test_required_and_optional_accessors() {
        let commands = get_tex_commands_args(r"\includegraphics[width=5cm]{fig.png}");
        let cmd = &commands[0];
        assert_eq!(cmd.optional().collect::<Vec<_>>(), vec!["width=5cm"]);
        assert_eq!(cmd.first_required(), Some("fig.png"));
        assert_eq!(cmd.last_required(), Some("fig.png"));
    }

    #[test]
    fn test_nested_argument_text() {
        let commands = get_tex_commands_args(r"\a{\b{D}\c{E}}");
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].arguments[0].text, r"\b{D}\c{E}");
    }

    #[test]
    fn test_malformed_yields_nothing() {
        assert!(get_tex_commands_args(r"This is \aCommand{nice invalid!").is_empty());
    }

    #[test]
    fn test_visit_order() {
        let mut names = Vec::new();
        visit_commands(r"\a{\b{x}\c{y}} \d{z}", &mut |cmd| names.push(cmd.name.to_string()));
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_rewrite_nested() {
        let text = r"\section{A \cite{k}} and \cite{j}[x]";
        let out = rewrite_commands(text, &mut |cmd| {
            (cmd.name == "cite").then(|| format!("<{}>", cmd.first_required().unwrap_or("")))
        });
        assert_eq!(out, r"\section{A <k>} and <j>");
    }

    #[test]
    fn test_rewrite_identity() {
        let text = r"x \f{1}[2] \g{\h{3}} y";
        assert_eq!(rewrite_commands(text, &mut |_| None), text);
    }
}
