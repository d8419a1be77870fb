//! # texstrip
//!
//! LaTeX command scanner, tag-rewriting engine and plain-text extractor.
//!
//! ## Features
//!
//! - **Command Scanner**: finds `\name{...}[...]` invocations with byte-exact
//!   argument spans, and bare `\name` commands
//! - **Delimiter Finder**: `$...$`-style regions, escape aware
//! - **Tag Applicator**: inserts caller-supplied markers around commands,
//!   arguments and delimited regions
//! - **Argument Extractor**: structured `(name, arguments)` records
//! - **Plain-Text Pipeline**: comments, includes, citations, references,
//!   environments, math and markup removed in one call
//!
//! ## Usage Examples
//!
//! ### Scanning and Tagging
//!
//! ```rust
//! use texstrip::{apply_tag_tex_commands, find_tex_commands, Markers};
//!
//! let spans = find_tex_commands(r"This is a \f{A}[B]");
//! assert_eq!(spans.len(), 2);
//!
//! let tagged = apply_tag_tex_commands(
//!     r"This is a \f{A}[B]",
//!     &Markers::from(["1", "2", "3", "4", "5"]),
//! );
//! assert_eq!(tagged, r"This is a 1\f2{3A4}52[3B4]5");
//! ```
//!
//! ### Plain Text
//!
//! ```rust
//! use texstrip::strip_latex;
//!
//! let text = strip_latex(r#"
//!     \documentclass{article}
//!     \begin{document}
//!     \section{Introduction}\label{sec:intro}
//!     As shown in Section~\ref{sec:intro} and \cite{knuth84}, $e^{i\pi} = -1$.
//!     \end{document}
//! "#);
//! assert_eq!(text, "Introduction\n\nAs shown in Section 1 and [1], [math].");
//! ```

/// Core scanning modules
pub mod core;

/// Data layer - static command tables
pub mod data;

/// Feature modules - pipeline stages
pub mod features;

/// Pipeline driver and options
pub mod pipeline;

/// Utility modules
pub mod utils;

// Re-export the scanner and tag engine
pub use core::{
    apply_tag_between_inside_char_command, apply_tag_tex_commands, apply_tag_tex_commands_no_argv,
    find_tex_command_char, find_tex_commands, find_tex_commands_noargv, get_tex_commands_args,
    rewrite_commands, visit_commands, Argument, BareMarkers, BareSpan, CommandMarkers, CommandSpan,
    DelimiterMarkers, DelimiterSpan, GroupKind, Markers, TexCommand,
};

// Re-export the pipeline
pub use features::{AnnotationMarkers, AnnotationStyle, CitationFormat};
pub use pipeline::{strip_latex, strip_latex_with_options, Pipeline, StripOptions};

// Re-export utilities
pub use utils::error::{PipelineOutput, PipelineWarning, TexError, TexResult, WarningKind};
pub use utils::files;

/// Annotate a LaTeX source with the markers of `style`
pub fn annotate(input: &str, style: &AnnotationStyle) -> String {
    features::annotate_latex(input, &style.markers())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_commands_sample() {
        let text = "This is a \\formula{epic} and this is not";
        let spans = find_tex_commands(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name(text), "formula");
        assert_eq!(spans[0].argument(text), "epic");
    }

    #[test]
    fn test_bare_commands_sample() {
        let text = r"\LaTeX\ and \textbf{bold}";
        let names: Vec<&str> = find_tex_commands_noargv(text)
            .iter()
            .map(|span| span.name(text))
            .collect();
        assert_eq!(names, vec!["LaTeX"]);
    }

    #[test]
    fn test_delimiter_tagging_sample() {
        assert_eq!(
            apply_tag_between_inside_char_command(
                "a $x$ b",
                ('$', '$'),
                &Markers::from(["<", "(", ")", ">"]),
                true,
            ),
            "a <$(x)$> b"
        );
    }

    #[test]
    fn test_bare_tagging_sample() {
        assert_eq!(
            apply_tag_tex_commands_no_argv(r"\alpha+\beta", &Markers::from(["[", "]"])),
            r"[\alpha]+[\beta]"
        );
    }

    #[test]
    fn test_arguments_sample() {
        let commands = get_tex_commands_args(r"\href{https://x.org}{site} \item");
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].name, "href");
        assert_eq!(
            commands[0].required().collect::<Vec<_>>(),
            vec!["https://x.org", "site"]
        );
    }

    #[test]
    fn test_strip_with_ansi_annotation() {
        let out = annotate(r"\emph{x}", &AnnotationStyle::Ansi);
        assert!(out.contains(r"\emph"));
        assert!(out.len() > r"\emph{x}".len());
    }

    #[test]
    fn test_marker_arity_error() {
        let err = CommandMarkers::try_from_slice(&["a", "b"]).unwrap_err();
        assert!(matches!(err, TexError::InvalidArgument { .. }));
    }
}
