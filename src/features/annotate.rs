//! Source annotation
//!
//! Instead of stripping markup, wraps every bracketed command, bare command
//! and `$...$` region with markers, e.g. terminal colors for a highlighted
//! view of the source. All insertion points are computed on the unmodified
//! text and spliced in one pass, so markers containing brackets or `$`
//! never disturb the scan.

use tracing::debug;

use crate::core::delimiters::find_tex_command_char;
use crate::core::lexer::{find_tex_commands, find_tex_commands_noargv};
use crate::core::tags::{BareMarkers, CommandMarkers, DelimiterMarkers, Markers};

const RESET: &str = "\x1b[0m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const YELLOW: &str = "\x1b[33m";
const MAGENTA: &str = "\x1b[35m";

/// Marker sets for the three kinds of annotated regions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotationMarkers {
    pub commands: CommandMarkers,
    pub bare: BareMarkers,
    pub math: DelimiterMarkers,
}

impl AnnotationMarkers {
    /// Cyan command names with dimmed brackets, yellow bare commands,
    /// magenta math
    pub fn ansi() -> Self {
        let reset_dim = format!("{}{}", RESET, DIM);
        Self {
            commands: Markers::from([CYAN, reset_dim.as_str(), RESET, DIM, RESET]),
            bare: Markers::from([YELLOW, RESET]),
            math: Markers::from([MAGENTA, "", "", RESET]),
        }
    }
}

/// How [`annotate_latex`] marks up the source
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AnnotationStyle {
    /// Terminal colors
    Ansi,
    /// Caller-supplied markers
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(AnnotationMarkers),
}

impl AnnotationStyle {
    pub fn markers(&self) -> AnnotationMarkers {
        match self {
            AnnotationStyle::Ansi => AnnotationMarkers::ansi(),
            AnnotationStyle::Custom(markers) => markers.clone(),
        }
    }
}

/// Where a marker goes relative to other markers at the same offset
///
/// Closing markers come first so that adjacent regions never overlap, and
/// outer opening markers come before inner ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    AfterClose,
    BeforeClose,
    CommandOpen,
    AfterOpen,
    InnerOpen,
}

struct Insertion<'a> {
    offset: usize,
    slot: Slot,
    marker: &'a str,
}

/// Markers to splice into one text, in any order
#[derive(Default)]
struct Plan<'a> {
    insertions: Vec<Insertion<'a>>,
}

impl<'a> Plan<'a> {
    fn add(&mut self, offset: usize, slot: Slot, marker: &'a str) {
        if !marker.is_empty() {
            self.insertions.push(Insertion {
                offset,
                slot,
                marker,
            });
        }
    }

    fn apply(mut self, text: &str) -> String {
        // stable, so equal slots keep their insertion order
        self.insertions
            .sort_by_key(|insertion| (insertion.offset, insertion.slot));
        debug!(markers = self.insertions.len(), "annotating source");

        let extra: usize = self.insertions.iter().map(|i| i.marker.len()).sum();
        let mut output = String::with_capacity(text.len() + extra);
        let mut copied = 0;
        for insertion in &self.insertions {
            output.push_str(&text[copied..insertion.offset]);
            output.push_str(insertion.marker);
            copied = insertion.offset;
        }
        output.push_str(&text[copied..]);
        output
    }
}

/// Annotate commands and inline math in `text`
pub fn annotate_latex(text: &str, markers: &AnnotationMarkers) -> String {
    let mut plan = Plan::default();

    let mut previous_start = None;
    for span in find_tex_commands(text) {
        if previous_start != Some(span.command_start) {
            plan.add(span.command_start, Slot::CommandOpen, markers.commands.get(0));
        }
        previous_start = Some(span.command_start);
        plan.add(span.group_open, Slot::CommandOpen, markers.commands.get(1));
        plan.add(span.arg_start, Slot::AfterOpen, markers.commands.get(2));
        // an empty argument closes after it opens
        let before_close = if span.arg_start == span.arg_end {
            Slot::AfterOpen
        } else {
            Slot::BeforeClose
        };
        plan.add(span.arg_end, before_close, markers.commands.get(3));
        plan.add(span.end(), Slot::AfterClose, markers.commands.get(4));
    }

    for span in find_tex_commands_noargv(text) {
        plan.add(span.start, Slot::InnerOpen, markers.bare.get(0));
        plan.add(span.end, Slot::AfterClose, markers.bare.get(1));
    }

    for span in find_tex_command_char(text, ('$', '$'), true) {
        plan.add(span.open, Slot::InnerOpen, markers.math.get(0));
        plan.add(span.open + 1, Slot::AfterOpen, markers.math.get(1));
        let before_close = if span.close == span.open + 1 {
            Slot::AfterOpen
        } else {
            Slot::BeforeClose
        };
        plan.add(span.close, before_close, markers.math.get(2));
        plan.add(span.close + 1, Slot::AfterClose, markers.math.get(3));
    }

    plan.apply(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn symbols() -> AnnotationMarkers {
        AnnotationMarkers {
            commands: Markers::from(["<", "(", "[", "]", ")"]),
            bare: Markers::from(["⟨", "⟩"]),
            math: Markers::from(["«", "‹", "›", "»"]),
        }
    }

    #[test]
    fn test_matches_command_tagging() {
        let text = r"This is a \f{A}[B]";
        assert_eq!(
            annotate_latex(text, &symbols()),
            crate::core::tags::apply_tag_tex_commands(text, &symbols().commands)
        );
    }

    #[test]
    fn test_all_kinds_together() {
        assert_eq!(
            annotate_latex(r"\alpha and \emph{$x$}", &symbols()),
            r"⟨\alpha⟩ and <\emph({[«$‹x›$»]})"
        );
    }

    #[test]
    fn test_empty_argument_and_math() {
        assert_eq!(annotate_latex(r"\x{}", &symbols()), r"<\x({[]})");
        assert_eq!(annotate_latex("$$", &symbols()), "«$‹›$»");
    }

    #[test]
    fn test_adjacent_regions() {
        assert_eq!(annotate_latex(r"\a\b{c}", &symbols()), r"⟨\a⟩<\b({[c]})");
    }

    #[test]
    fn test_markers_are_not_rescanned() {
        let markers = AnnotationMarkers {
            commands: Markers::from("[$]"),
            bare: Markers::none(),
            math: Markers::none(),
        };
        assert_eq!(annotate_latex(r"\f{a}", &markers), r"[$]\f[$]{[$]a[$]}[$]");
    }

    #[test]
    fn test_ansi_markers_reset() {
        let out = annotate_latex(r"\emph{x}", &AnnotationStyle::Ansi.markers());
        assert!(out.starts_with(CYAN));
        assert!(out.ends_with(RESET));
        assert!(out.contains('x'));
    }
}
