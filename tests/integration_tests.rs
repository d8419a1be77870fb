//! Integration tests for texstrip scanning, tagging and plain-text extraction

use pretty_assertions::assert_eq;
use texstrip::{
    apply_tag_between_inside_char_command, apply_tag_tex_commands, apply_tag_tex_commands_no_argv,
    files::MemoryFileResolver, find_tex_command_char, find_tex_commands, find_tex_commands_noargv,
    get_tex_commands_args, strip_latex, strip_latex_with_options, CitationFormat, CommandMarkers,
    Markers, Pipeline, StripOptions, WarningKind,
};

const SAMPLES: &[&str] = &[
    "This is a \\formula{epic} and this is not",
    r"This is a \f{A}[B]",
    r"\a{\b{D}\c{E}} tail",
    "\\section{Intro}\n\nSome $x$ text \\emph{with [brackets]} and \\LaTeX.",
    "\\cmd\n  {continued}\n\\other\n\n{not an argument}",
    r"This is \aCommand{nice invalid!",
    r"\begin{itemize}\item[a)] one \item two\end{itemize}",
];

// ============================================================================
// Command Lexer
// ============================================================================

mod scanner {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_spans_strictly_ordered_and_disjoint() {
        for text in SAMPLES {
            let spans = find_tex_commands(text);
            for pair in spans.windows(2) {
                assert!(
                    pair[0].group_open < pair[1].group_open,
                    "unordered spans in {:?}",
                    text
                );
                assert!(pair[0].arg_end < pair[1].group_open);
                assert!(pair[0].command_start <= pair[1].command_start);
            }
        }
    }

    #[test]
    fn test_balanced_nesting() {
        let text = r"\a{\b{D}\c{E}}";
        let spans = find_tex_commands(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].argument(text), r"\b{D}\c{E}");
    }

    #[test]
    fn test_continuation_flag() {
        let spans = find_tex_commands(r"\f{1}{2}");
        assert_eq!(spans.len(), 2);
        assert!(spans[0].continues);
        assert!(!spans[1].continues);
    }

    #[test]
    fn test_malformed_input_yields_nothing() {
        assert!(find_tex_commands(r"This is \aCommand{nice invalid!").is_empty());
    }

    #[test]
    fn test_paragraph_break_ends_argument_search() {
        let text = "\\cmd\n  {continued}\n\\other\n\n{not an argument}";
        let names: Vec<&str> = find_tex_commands(text)
            .iter()
            .map(|span| span.name(text))
            .collect();
        assert_eq!(names, vec!["cmd"]);
    }

    #[test]
    fn test_noargv_never_reports_commands_with_groups() {
        for text in SAMPLES {
            for span in find_tex_commands_noargv(text) {
                let next = text.as_bytes().get(span.end).copied();
                assert!(
                    next != Some(b'{') && next != Some(b'['),
                    "{:?} reported with an argument in {:?}",
                    span.name(text),
                    text
                );
            }
        }
    }

    #[test]
    fn test_escape_awareness() {
        assert!(find_tex_command_char(r"$formula\$", ('$', '$'), true).is_empty());
        assert_eq!(find_tex_command_char(r"$formula\$$", ('$', '$'), true).len(), 1);
        assert_eq!(find_tex_command_char(r"$formula\$", ('$', '$'), false).len(), 1);
    }
}

// ============================================================================
// Tag Applicator
// ============================================================================

mod tagging {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbered() -> CommandMarkers {
        Markers::from(["1", "2", "3", "4", "5"])
    }

    #[test]
    fn test_sample_end_to_end() {
        assert_eq!(
            apply_tag_tex_commands("This is a \\formula{epic} and this is not", &numbered()),
            "This is a 1\\formula2{3epic4}5 and this is not"
        );
    }

    #[test]
    fn test_sample_multi_command() {
        assert_eq!(
            apply_tag_tex_commands(r"This is a \f{A}[B]", &numbered()),
            r"This is a 1\f2{3A4}52[3B4]5"
        );
    }

    #[test]
    fn test_empty_markers_are_identity() {
        for text in SAMPLES {
            assert_eq!(apply_tag_tex_commands(text, &Markers::from("")), *text);
            assert_eq!(apply_tag_tex_commands_no_argv(text, &Markers::none()), *text);
            assert_eq!(
                apply_tag_between_inside_char_command(text, ('$', '$'), &Markers::none(), true),
                *text
            );
        }
    }

    #[test]
    fn test_length_accounting() {
        let markers: CommandMarkers = Markers::from(["a", "bb", "ccc", "dddd", "eeeee"]);
        for text in SAMPLES {
            let spans = find_tex_commands(text);
            let commands = spans.iter().filter(|span| !span.continues).count();
            let expected = text.len() + commands + spans.len() * (2 + 3 + 4 + 5);
            assert_eq!(apply_tag_tex_commands(text, &markers).len(), expected);
        }
    }

    #[test]
    fn test_runtime_marker_arity() {
        let markers = vec!["<".to_string(), ">".to_string()];
        assert!(CommandMarkers::try_from_slice(markers.as_slice()).is_err());
        let bare = texstrip::BareMarkers::try_from_slice(markers.as_slice()).unwrap();
        assert_eq!(
            apply_tag_tex_commands_no_argv(r"\alpha", &bare),
            r"<\alpha>"
        );
    }
}

// ============================================================================
// Argument Extractor
// ============================================================================

mod arguments {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_groups_per_command() {
        let commands = get_tex_commands_args(r"\cite[see][p.~4]{knuth} \emph{x}");
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0].optional().collect::<Vec<_>>(), vec!["see", "p.~4"]);
        assert_eq!(commands[0].first_required(), Some("knuth"));
        assert_eq!(commands[1].name, "emph");
    }

    #[test]
    fn test_ranges_cover_invocations() {
        let text = r"A \f{1}[2] B \g{3}";
        let spans: Vec<&str> = get_tex_commands_args(text)
            .iter()
            .map(|cmd| &text[cmd.range()])
            .collect();
        assert_eq!(spans, vec![r"\f{1}[2]", r"\g{3}"]);
    }
}

// ============================================================================
// Plain-Text Pipeline
// ============================================================================

mod pipeline {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAPER: &str = r"\documentclass{article}
\usepackage{amsmath}
\title{Ignored preamble}
\begin{document}
\section{Introduction}\label{sec:intro}
We build on \cite{knuth84} and \citep[p.~3]{lamport94,knuth84}. % more to come
Costs are 50\% lower.

\begin{figure}
  \includegraphics{plot.pdf}
  \caption{Results}\label{fig:results}
\end{figure}

\subsection{Details}
Figure~\ref{fig:results} shows
\begin{equation}
  E = mc^2 \label{eq:energy}
\end{equation}
and \eqref{eq:energy} holds for $m > 0$.
\begin{verbatim}
\this{is} code
\end{verbatim}
See \ref{sec:missing}.
\end{document}
";

    #[test]
    fn test_full_document() {
        let output = Pipeline::default().run(PAPER);
        assert_eq!(
            output.content,
            "Introduction\n\n\
             We build on [1] and [2, 1, p. 3].\n\
             Costs are 50% lower.\n\n\
             Results\n\n\
             Details\n\n\
             Figure 1 shows\n\
             [math]\n\
             and (1) holds for [math].\n\n\
             See ??."
        );
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(output.warnings[0].kind, WarningKind::UnknownReference);
    }

    #[test]
    fn test_comment_keeps_escaped_percent() {
        assert_eq!(strip_latex("100\\% sure % not this\n"), "100% sure");
    }

    #[test]
    fn test_keys_citation_format() {
        let options = StripOptions {
            citation_format: CitationFormat::Keys,
            ..StripOptions::default()
        };
        let output = strip_latex_with_options(r"\cite{a,b}", &options);
        assert_eq!(output.content, "[a, b]");
    }

    #[test]
    fn test_custom_math_placeholder() {
        let options = StripOptions {
            math_placeholder: "MATH".to_string(),
            ..StripOptions::default()
        };
        let output = strip_latex_with_options(r"Let \(x\) and $$y$$.", &options);
        assert_eq!(output.content, "Let MATH and MATH.");
    }

    #[test]
    fn test_minimal_preserves_layout() {
        let output = strip_latex_with_options("a  \\textbf{b}\n\n\n\nc", &StripOptions::minimal());
        assert_eq!(output.content, "a  b\n\n\n\nc");
    }
}

// ============================================================================
// Multi-file Documents
// ============================================================================

mod includes {
    use super::*;
    use pretty_assertions::assert_eq;

    fn book() -> MemoryFileResolver {
        MemoryFileResolver::new()
            .with_file(
                "book/chapters/one.tex",
                "\\section{One}\\label{one}\nText % hidden\n",
            )
            .with_file("book/chapters/two.tex", r"\section{Two} back to \ref{one}")
    }

    #[test]
    fn test_includes_and_cross_file_references() {
        let pipeline = Pipeline::default()
            .with_resolver(book())
            .with_source_path("book/main.tex");
        let output = pipeline.run(r"\input{chapters/one}\include{chapters/two}");
        assert_eq!(output.content, "One\n\nText\n\nTwo\n\nback to 1");
        assert!(!output.has_warnings());
    }

    #[test]
    fn test_missing_files_reported_per_run() {
        let pipeline = Pipeline::default().with_resolver(book());
        let first = pipeline.run(r"\input{nope}");
        let second = pipeline.run(r"\input{nope}");
        assert_eq!(first.warnings.len(), 1);
        assert_eq!(second.warnings.len(), 1);
        assert_eq!(first.warnings[0].kind, WarningKind::MissingInclude);
    }
}

// ============================================================================
// Concurrency
// ============================================================================

mod concurrency {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shared_pipeline_across_threads() {
        let pipeline = Pipeline::default();
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let pipeline = &pipeline;
                    scope.spawn(move || pipeline.run(&format!(r"\cite{{k{}}} \emph{{x}}", i)))
                })
                .collect();
            for handle in handles {
                let output = handle.join().unwrap();
                assert_eq!(output.content, "[1] x");
            }
        });
    }
}
