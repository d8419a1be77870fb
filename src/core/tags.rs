//! Tag applicator
//!
//! Re-renders LaTeX text with caller-supplied marker strings inserted at the
//! boundaries of the spans found by the [lexer](super::lexer) and the
//! [delimiter finder](super::delimiters). Every byte outside the inserted
//! markers is copied verbatim and in order, so the output length is the
//! input length plus the length of all inserted markers.
//!
//! ## Example
//!
//! ```rust
//! use texstrip::core::tags::{apply_tag_tex_commands, Markers};
//!
//! let tagged = apply_tag_tex_commands(
//!     r"This is a \f{A}[B]",
//!     &Markers::from(["1", "2", "3", "4", "5"]),
//! );
//! assert_eq!(tagged, r"This is a 1\f2{3A4}52[3B4]5");
//! ```

use super::delimiters::{find_tex_command_char, DelimiterSpan};
use super::lexer::{find_tex_commands, find_tex_commands_noargv, BareSpan, CommandSpan};
use crate::utils::error::{TexError, TexResult};

/// Marker strings for `N` insertion positions
///
/// `Uniform` broadcasts one string to every position, `PerPosition` gives
/// each position its own string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markers<const N: usize> {
    Uniform(String),
    PerPosition([String; N]),
}

/// Markers around a bracketed command: before the backslash, before the
/// opening bracket, after it, before the closing bracket, after it
pub type CommandMarkers = Markers<5>;

/// Markers around a bare command: before the backslash, after the name
pub type BareMarkers = Markers<2>;

/// Markers around a delimiter pair: before open, after open, before close,
/// after close
pub type DelimiterMarkers = Markers<4>;

impl<const N: usize> Markers<N> {
    /// Marker set that inserts nothing
    pub fn none() -> Self {
        Markers::Uniform(String::new())
    }

    pub fn uniform(marker: impl Into<String>) -> Self {
        Markers::Uniform(marker.into())
    }

    /// Build per-position markers from a runtime slice
    ///
    /// Fails with [`TexError::InvalidArgument`] unless exactly `N` markers are
    /// given.
    pub fn try_from_slice<S: AsRef<str>>(markers: &[S]) -> TexResult<Self> {
        if markers.len() != N {
            return Err(TexError::invalid_argument(format!(
                "expected {} markers, got {}",
                N,
                markers.len()
            )));
        }
        Ok(Markers::PerPosition(std::array::from_fn(|i| {
            markers[i].as_ref().to_string()
        })))
    }

    /// Marker for insertion position `position` (`0..N`)
    pub fn get(&self, position: usize) -> &str {
        match self {
            Markers::Uniform(marker) => marker,
            Markers::PerPosition(markers) => &markers[position],
        }
    }

    /// True when no position inserts anything
    pub fn is_empty(&self) -> bool {
        match self {
            Markers::Uniform(marker) => marker.is_empty(),
            Markers::PerPosition(markers) => markers.iter().all(String::is_empty),
        }
    }
}

impl<const N: usize> Default for Markers<N> {
    fn default() -> Self {
        Self::none()
    }
}

impl<const N: usize> From<&str> for Markers<N> {
    fn from(marker: &str) -> Self {
        Markers::Uniform(marker.to_string())
    }
}

impl<const N: usize> From<String> for Markers<N> {
    fn from(marker: String) -> Self {
        Markers::Uniform(marker)
    }
}

impl<const N: usize> From<[&str; N]> for Markers<N> {
    fn from(markers: [&str; N]) -> Self {
        Markers::PerPosition(markers.map(String::from))
    }
}

/// Copies text while inserting markers at non-decreasing offsets
struct Splicer<'a> {
    text: &'a str,
    output: String,
    copied: usize,
}

impl<'a> Splicer<'a> {
    fn new(text: &'a str, extra: usize) -> Self {
        Self {
            text,
            output: String::with_capacity(text.len() + extra),
            copied: 0,
        }
    }

    fn insert(&mut self, offset: usize, marker: &str) {
        debug_assert!(offset >= self.copied, "markers must be inserted in order");
        self.output.push_str(&self.text[self.copied..offset]);
        self.output.push_str(marker);
        self.copied = offset;
    }

    fn finish(mut self) -> String {
        self.output.push_str(&self.text[self.copied..]);
        self.output
    }
}

fn estimate<const N: usize>(markers: &Markers<N>, spans: usize) -> usize {
    (0..N).map(|i| markers.get(i).len()).sum::<usize>() * spans
}

/// Tag every bracketed command in `text`
///
/// The first marker goes before the backslash of a command and is written
/// once per command; the other four surround each of its argument groups.
/// Between two groups of the same command this yields e.g. `}5` + `2[`.
pub fn apply_tag_tex_commands(text: &str, markers: &CommandMarkers) -> String {
    if markers.is_empty() {
        return text.to_string();
    }
    tag_command_spans(text, &find_tex_commands(text), markers)
}

/// Tag pre-computed command spans without re-scanning `text`
///
/// `spans` must come from [`find_tex_commands`] on the same text.
pub fn tag_command_spans(text: &str, spans: &[CommandSpan], markers: &CommandMarkers) -> String {
    let mut splicer = Splicer::new(text, estimate(markers, spans.len()));
    let mut inside_command = false;

    for span in spans {
        if !inside_command {
            splicer.insert(span.command_start, markers.get(0));
        }
        splicer.insert(span.group_open, markers.get(1));
        splicer.insert(span.arg_start, markers.get(2));
        splicer.insert(span.arg_end, markers.get(3));
        splicer.insert(span.end(), markers.get(4));
        inside_command = span.continues;
    }

    splicer.finish()
}

/// Tag every command that has no argument group
pub fn apply_tag_tex_commands_no_argv(text: &str, markers: &BareMarkers) -> String {
    if markers.is_empty() {
        return text.to_string();
    }
    tag_bare_spans(text, &find_tex_commands_noargv(text), markers)
}

/// Tag pre-computed bare-command spans
pub fn tag_bare_spans(text: &str, spans: &[BareSpan], markers: &BareMarkers) -> String {
    let mut splicer = Splicer::new(text, estimate(markers, spans.len()));
    for span in spans {
        splicer.insert(span.start, markers.get(0));
        splicer.insert(span.end, markers.get(1));
    }
    splicer.finish()
}

/// Tag every `open ... close` region, e.g. inline math
pub fn apply_tag_between_inside_char_command(
    text: &str,
    delimiters: (char, char),
    markers: &DelimiterMarkers,
    ignore_escape: bool,
) -> String {
    if markers.is_empty() {
        return text.to_string();
    }
    let spans = find_tex_command_char(text, delimiters, ignore_escape);
    tag_delimiter_spans(text, &spans, delimiters, markers)
}

/// Tag pre-computed delimiter spans
pub fn tag_delimiter_spans(
    text: &str,
    spans: &[DelimiterSpan],
    delimiters: (char, char),
    markers: &DelimiterMarkers,
) -> String {
    let (open_char, close_char) = delimiters;
    let mut splicer = Splicer::new(text, estimate(markers, spans.len()));
    for span in spans {
        splicer.insert(span.open, markers.get(0));
        splicer.insert(span.open + open_char.len_utf8(), markers.get(1));
        splicer.insert(span.close, markers.get(2));
        splicer.insert(span.close + close_char.len_utf8(), markers.get(3));
    }
    splicer.finish()
}
