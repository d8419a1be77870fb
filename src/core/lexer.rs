//! LaTeX command lexer
//!
//! Locates control sequences (`\name`) in raw LaTeX text together with the
//! `{...}` / `[...]` argument groups that follow them. The scanner is purely
//! lexical: it tracks balanced delimiters and command-name syntax, nothing
//! else.
//!
//! Two entry points are provided:
//!
//! - [`find_tex_commands`] reports every top-level command that has at least
//!   one argument group, one [`CommandSpan`] per group.
//! - [`find_tex_commands_noargv`] reports commands that are *not* followed by
//!   an argument group, as [`BareSpan`]s.
//!
//! All offsets are byte offsets into the scanned `&str`. Every character the
//! lexer reacts to is ASCII, so offsets always fall on char boundaries.
//!
//! ## Example
//!
//! ```rust
//! use texstrip::core::lexer::find_tex_commands;
//!
//! let text = r"\frac{1}{2}";
//! let spans = find_tex_commands(text);
//! assert_eq!(spans.len(), 2);
//! assert!(spans[0].continues);
//! assert_eq!(spans[1].argument(text), "2");
//! ```

use std::fmt;
use tracing::trace;

/// Kind of bracket that opened an argument group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupKind {
    /// Mandatory argument: `{...}`
    Brace,
    /// Optional argument: `[...]`
    Bracket,
}

impl GroupKind {
    /// Classify an opening byte
    pub fn from_opener(byte: u8) -> Option<Self> {
        match byte {
            b'{' => Some(GroupKind::Brace),
            b'[' => Some(GroupKind::Bracket),
            _ => None,
        }
    }

    pub fn open_char(self) -> char {
        match self {
            GroupKind::Brace => '{',
            GroupKind::Bracket => '[',
        }
    }

    pub fn close_char(self) -> char {
        match self {
            GroupKind::Brace => '}',
            GroupKind::Bracket => ']',
        }
    }

    pub fn is_optional(self) -> bool {
        self == GroupKind::Bracket
    }
}

/// One argument group of a command, e.g. `{epic}` in `\formula{epic}`
///
/// ```text
/// This is a \formula{epic}
///           |       ||   |
///           |       ||   arg_end
///           |       |arg_start
///           |       group_open (== name_end here)
///           command_start
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandSpan {
    /// Offset of the command's backslash (shared by all groups of a command)
    pub command_start: usize,
    /// Exclusive end of the command name
    pub name_end: usize,
    /// Offset of the opening `{` or `[`
    pub group_open: usize,
    /// First byte of the argument text (`group_open + 1`)
    pub arg_start: usize,
    /// Offset of the closing bracket, i.e. exclusive end of the argument text
    pub arg_end: usize,
    /// Another argument group of the same command follows this one
    pub continues: bool,
    /// Bracket kind that opened this group
    pub kind: GroupKind,
}

impl CommandSpan {
    /// Command name without the backslash
    pub fn name<'a>(&self, text: &'a str) -> &'a str {
        &text[self.command_start + 1..self.name_end]
    }

    /// Argument text without the enclosing brackets
    pub fn argument<'a>(&self, text: &'a str) -> &'a str {
        &text[self.arg_start..self.arg_end]
    }

    /// Exclusive end of the whole group (one past the closing bracket)
    pub fn end(&self) -> usize {
        self.arg_end + 1
    }
}

/// A command with no argument group, e.g. `\LaTeX`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BareSpan {
    /// Offset of the backslash
    pub start: usize,
    /// Exclusive end of the command name
    pub end: usize,
}

impl BareSpan {
    /// Command name without the backslash
    pub fn name<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start + 1..self.end]
    }
}

impl fmt::Display for CommandSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{} ({}{}{}){}",
            self.command_start,
            self.end(),
            self.kind.open_char(),
            self.arg_start,
            self.kind.close_char(),
            if self.continues { " +" } else { "" }
        )
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// `\` followed by an ASCII letter
pub(crate) fn is_command_start(bytes: &[u8], pos: usize) -> bool {
    bytes.get(pos) == Some(&b'\\') && bytes.get(pos + 1).is_some_and(u8::is_ascii_alphabetic)
}

/// What a blank character means while looking for an argument group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Blank {
    /// Keep searching
    Skip,
    /// Stop searching, the command has no (further) argument
    Stop,
    /// Not a blank character at all
    NotBlank,
}

/// A newline only continues the search when more whitespace follows it;
/// a newline directly followed by anything else (text, a bracket, another
/// command) ends it.
fn classify_blank(bytes: &[u8], pos: usize) -> Blank {
    match bytes[pos] {
        b' ' | b'\t' | b'\r' => Blank::Skip,
        b'\n' => match bytes.get(pos + 1) {
            Some(b' ' | b'\t' | b'\r' | b'\n') => Blank::Skip,
            _ => Blank::Stop,
        },
        _ => Blank::NotBlank,
    }
}

/// Whether an argument group starts at `pos`, after optional blanks
fn followed_by_group(bytes: &[u8], mut pos: usize) -> bool {
    while pos < bytes.len() {
        if GroupKind::from_opener(bytes[pos]).is_some() {
            return true;
        }
        match classify_blank(bytes, pos) {
            Blank::Skip => pos += 1,
            Blank::Stop | Blank::NotBlank => return false,
        }
    }
    false
}

// ============================================================================
// Bracketed commands
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Plain text
    Idle,
    /// Reading the letters of a command name
    CommandName,
    /// Name finished, looking for the first `{` or `[`
    AwaitingArgument,
    /// Inside an argument group
    InGroup,
    /// A group just closed, looking for another one
    AfterGroup,
}

struct CommandScanner<'a> {
    bytes: &'a [u8],
    state: State,
    spans: Vec<CommandSpan>,
    command_start: usize,
    name_end: usize,
    group_open: usize,
    group_kind: GroupKind,
    brace_depth: i32,
    bracket_depth: i32,
    /// Groups already emitted for the current command
    emitted: usize,
}

impl<'a> CommandScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            state: State::Idle,
            spans: Vec::new(),
            command_start: 0,
            name_end: 0,
            group_open: 0,
            group_kind: GroupKind::Brace,
            brace_depth: 0,
            bracket_depth: 0,
            emitted: 0,
        }
    }

    fn run(mut self) -> Vec<CommandSpan> {
        let mut pos = 0;
        while pos < self.bytes.len() {
            pos = self.step(pos);
        }
        match self.state {
            State::InGroup => {
                trace!(
                    offset = self.group_open,
                    "dropping unterminated argument group"
                );
                self.finish_command();
            }
            State::AfterGroup => self.finish_command(),
            _ => {}
        }
        self.spans
    }

    /// Process the byte at `pos`, returning the next position to look at.
    /// Transitions back to `Idle` may return `pos` itself so the byte is
    /// re-read as plain text; `Idle` always advances.
    fn step(&mut self, pos: usize) -> usize {
        let byte = self.bytes[pos];
        match self.state {
            State::Idle => {
                if byte != b'\\' {
                    return pos + 1;
                }
                if is_command_start(self.bytes, pos) {
                    self.command_start = pos;
                    self.emitted = 0;
                    self.state = State::CommandName;
                }
                // Either the first name letter or an escaped character
                pos + 2
            }
            State::CommandName => {
                if byte.is_ascii_alphabetic() {
                    return pos + 1;
                }
                self.name_end = pos;
                if let Some(kind) = GroupKind::from_opener(byte) {
                    self.open_group(pos, kind);
                    return pos + 1;
                }
                if classify_blank(self.bytes, pos) != Blank::NotBlank {
                    self.state = State::AwaitingArgument;
                } else {
                    self.abort_command();
                }
                pos
            }
            State::AwaitingArgument => {
                if let Some(kind) = GroupKind::from_opener(byte) {
                    self.open_group(pos, kind);
                    return pos + 1;
                }
                match classify_blank(self.bytes, pos) {
                    Blank::Skip => pos + 1,
                    Blank::Stop | Blank::NotBlank => {
                        self.abort_command();
                        pos
                    }
                }
            }
            State::InGroup => self.step_in_group(pos, byte),
            State::AfterGroup => {
                if let Some(kind) = GroupKind::from_opener(byte) {
                    if let Some(last) = self.spans.last_mut() {
                        last.continues = true;
                    }
                    self.open_group(pos, kind);
                    return pos + 1;
                }
                match classify_blank(self.bytes, pos) {
                    Blank::Skip => pos + 1,
                    Blank::Stop | Blank::NotBlank => {
                        self.finish_command();
                        pos
                    }
                }
            }
        }
    }

    fn step_in_group(&mut self, pos: usize, byte: u8) -> usize {
        match byte {
            // Escaped character never affects depth
            b'\\' => return pos + 2,
            b'{' => self.brace_depth += 1,
            b'}' => self.brace_depth -= 1,
            b'[' => self.bracket_depth += 1,
            b']' => self.bracket_depth -= 1,
            _ => return pos + 1,
        }

        if self.brace_depth < 0 || self.bracket_depth < 0 {
            trace!(offset = pos, "abandoning group on unbalanced closer");
            self.finish_command();
            return pos + 1;
        }

        if self.brace_depth == 0 && self.bracket_depth == 0 {
            self.spans.push(CommandSpan {
                command_start: self.command_start,
                name_end: self.name_end,
                group_open: self.group_open,
                arg_start: self.group_open + 1,
                arg_end: pos,
                continues: false,
                kind: self.group_kind,
            });
            self.emitted += 1;
            self.state = State::AfterGroup;
        }
        pos + 1
    }

    fn open_group(&mut self, pos: usize, kind: GroupKind) {
        self.group_open = pos;
        self.group_kind = kind;
        self.brace_depth = 0;
        self.bracket_depth = 0;
        match kind {
            GroupKind::Brace => self.brace_depth = 1,
            GroupKind::Bracket => self.bracket_depth = 1,
        }
        self.state = State::InGroup;
    }

    /// Command had no argument group at all
    fn abort_command(&mut self) {
        self.state = State::Idle;
        self.emitted = 0;
    }

    /// End the current command, keeping every group that closed properly
    fn finish_command(&mut self) {
        if self.emitted > 0 {
            if let Some(last) = self.spans.last_mut() {
                last.continues = false;
            }
        }
        self.state = State::Idle;
        self.emitted = 0;
    }
}

/// Find every top-level command with bracketed arguments
///
/// One span is emitted per argument group; all groups but the last of a
/// command are marked `continues`. Commands nested inside an argument are
/// part of that argument's text and are not reported separately. Malformed
/// groups (unterminated, or closed by an unbalanced bracket) are skipped.
///
/// ```rust
/// use texstrip::core::lexer::find_tex_commands;
///
/// let text = r"\a{\b{D}\c{E}}";
/// let spans = find_tex_commands(text);
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].argument(text), r"\b{D}\c{E}");
/// ```
pub fn find_tex_commands(text: &str) -> Vec<CommandSpan> {
    CommandScanner::new(text).run()
}

// ============================================================================
// Bare commands
// ============================================================================

/// Find every command that is not followed by an argument group
///
/// Unlike [`find_tex_commands`], this also reports commands that appear
/// inside the arguments of other commands.
///
/// ```rust
/// use texstrip::core::lexer::find_tex_commands_noargv;
///
/// let text = r"\LaTeX\ and \textbf{bold}";
/// let spans = find_tex_commands_noargv(text);
/// assert_eq!(spans.len(), 1);
/// assert_eq!(spans[0].name(text), "LaTeX");
/// ```
pub fn find_tex_commands_noargv(text: &str) -> Vec<BareSpan> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'\\' {
            pos += 1;
            continue;
        }
        if !is_command_start(bytes, pos) {
            pos += 2;
            continue;
        }

        let start = pos;
        let mut end = pos + 1;
        while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
            end += 1;
        }

        if !followed_by_group(bytes, end) {
            spans.push(BareSpan { start, end });
        }
        pos = end;
    }

    spans
}
