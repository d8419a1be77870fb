//! Stripping pipeline
//!
//! Drives the feature stages in order over one document:
//!
//! 1. comments
//! 2. document body
//! 3. includes
//! 4. citations
//! 5. references
//! 6. environments
//! 7. math
//! 8. markup
//! 9. whitespace
//!
//! All state of a run (parked placeholders, citation numbers, include
//! bookkeeping, warnings) lives in a context created by [`Pipeline::run`],
//! so one `Pipeline` can serve any number of documents, also concurrently.

pub mod options;

pub use options::StripOptions;

use tracing::debug;

use crate::features::annotate::annotate_latex;
use crate::features::citations::{number_citations, CitationRegistry};
use crate::features::comments::remove_comments;
use crate::features::environments::{extract_document_body, strip_environments};
use crate::features::includes::{process_includes, IncludeOptions, IncludeState};
use crate::features::markup::strip_commands;
use crate::features::math::replace_math;
use crate::features::placeholders::PlaceholderStore;
use crate::features::references::number_references;
use crate::features::whitespace::normalize_whitespace;
use crate::utils::error::{
    PipelineOutput, PipelineWarning, TexError, TexResult, WarningKind,
};
use crate::utils::files::{FileResolver, NoopFileResolver};

/// Everything one run learns about its document
#[derive(Debug, Default)]
struct RunContext {
    placeholders: PlaceholderStore,
    citations: CitationRegistry,
    includes: IncludeState,
    warnings: Vec<PipelineWarning>,
}

/// A configured LaTeX-to-text converter
pub struct Pipeline {
    options: StripOptions,
    resolver: Box<dyn FileResolver>,
    source_path: String,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(StripOptions::default())
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("options", &self.options)
            .field("source_path", &self.source_path)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Pipeline that cannot read included files
    pub fn new(options: StripOptions) -> Self {
        Self {
            options,
            resolver: Box::new(NoopFileResolver),
            source_path: String::from("main.tex"),
        }
    }

    /// Read included files through `resolver`
    pub fn with_resolver(mut self, resolver: impl FileResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Path of the document, for resolving relative includes
    pub fn with_source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = path.into();
        self
    }

    pub fn options(&self) -> &StripOptions {
        &self.options
    }

    /// Strip (or annotate) `input`, collecting warnings
    pub fn run(&self, input: &str) -> PipelineOutput {
        let (content, context) = self.execute(input);
        PipelineOutput::with_warnings(content, context.warnings)
    }

    /// Like [`run`](Self::run), but the first warning becomes an error
    pub fn run_strict(&self, input: &str) -> TexResult<String> {
        let (content, context) = self.execute(input);
        if let Some(path) = context.includes.not_found.first() {
            return Err(TexError::include(path, "file not found"));
        }
        if let Some(path) = context.includes.too_deep.first() {
            return Err(TexError::include(
                path,
                format!(
                    "nested deeper than {} levels",
                    self.options.max_include_depth
                ),
            ));
        }
        match context.warnings.into_iter().next() {
            Some(warning) => Err(TexError::strict(warning.to_string())),
            None => Ok(content),
        }
    }

    fn execute(&self, input: &str) -> (String, RunContext) {
        let options = &self.options;
        let mut context = RunContext::default();

        if let Some(style) = &options.annotate {
            debug!("annotating instead of stripping");
            return (annotate_latex(input, &style.markers()), context);
        }

        let mut text = if options.remove_comments {
            remove_comments(input)
        } else {
            input.to_string()
        };
        debug!(stage = "comments", bytes = text.len());

        if options.document_body_only {
            text = extract_document_body(&text).to_string();
            debug!(stage = "document body", bytes = text.len());
        }

        if options.resolve_includes {
            let include_options = IncludeOptions {
                max_depth: options.max_include_depth,
                strip_comments: options.remove_comments,
            };
            text = process_includes(
                &text,
                &self.source_path,
                self.resolver.as_ref(),
                &include_options,
                &mut context.includes,
            );
            for path in &context.includes.not_found {
                context.warnings.push(PipelineWarning::new(
                    WarningKind::MissingInclude,
                    format!("cannot read '{}'", path),
                ));
            }
            for path in &context.includes.too_deep {
                context.warnings.push(PipelineWarning::new(
                    WarningKind::IncludeDepth,
                    format!("'{}' skipped, nesting too deep", path),
                ));
            }
            debug!(
                stage = "includes",
                bytes = text.len(),
                files = context.includes.included.len()
            );
        }

        if options.number_citations {
            text = number_citations(
                &text,
                options.citation_format,
                &mut context.citations,
                &mut context.placeholders,
            );
            debug!(stage = "citations", bytes = text.len());
        }

        if options.resolve_references {
            text = number_references(&text, &options.unknown_reference, &mut context.warnings);
            debug!(stage = "references", bytes = text.len());
        }

        text = strip_environments(&text, options.ignored_environments.as_slice());
        debug!(stage = "environments", bytes = text.len());

        text = replace_math(&text, &options.math_placeholder, &mut context.placeholders);
        debug!(stage = "math", bytes = text.len());

        text = strip_commands(&text);
        debug!(stage = "markup", bytes = text.len());

        if options.collapse_whitespace {
            text = normalize_whitespace(&text);
            debug!(stage = "whitespace", bytes = text.len());
        }

        let content = context.placeholders.restore(&text);
        (content, context)
    }
}

/// Strip LaTeX markup with default options
///
/// ```rust
/// use texstrip::strip_latex;
///
/// let text = strip_latex(r"\section{Intro} Some \textbf{bold} text.");
/// assert_eq!(text, "Intro\n\nSome bold text.");
/// ```
pub fn strip_latex(input: &str) -> String {
    Pipeline::default().run(input).content
}

/// Strip LaTeX markup with custom options
pub fn strip_latex_with_options(input: &str, options: &StripOptions) -> PipelineOutput {
    Pipeline::new(options.clone()).run(input)
}
