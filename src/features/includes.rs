//! Multi-file documents
//!
//! Replaces `\input{file}`, `\include{file}` and `\subfile{file}` with the
//! content of the named file, recursively. Everything learned during a run
//! (missing files, cut-off nesting) is recorded in a caller-owned
//! [`IncludeState`], so independent documents can be processed concurrently.

use tracing::{debug, warn};

use super::comments::remove_comments;
use crate::core::args::rewrite_commands;
use crate::data::commands::INCLUDE_COMMANDS;
use crate::utils::files::FileResolver;

/// Include resolution settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncludeOptions {
    /// Maximum nesting of included files
    pub max_depth: usize,
    /// Strip comments from included files before scanning them
    pub strip_comments: bool,
}

impl Default for IncludeOptions {
    fn default() -> Self {
        Self {
            max_depth: 8,
            strip_comments: true,
        }
    }
}

/// Per-run include bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeState {
    /// Files that were included successfully, in order
    pub included: Vec<String>,
    /// Include targets that could not be read
    pub not_found: Vec<String>,
    /// Include targets skipped because nesting was too deep
    pub too_deep: Vec<String>,
}

impl IncludeState {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_missing(&mut self, path: &str) {
        if !self.not_found.iter().any(|p| p == path) {
            self.not_found.push(path.to_string());
        }
    }
}

/// Inline every include command of `content`
///
/// `current_file` is the path of `content` itself; relative targets are
/// resolved against it. Unresolvable commands are removed from the output.
pub fn process_includes<R: FileResolver + ?Sized>(
    content: &str,
    current_file: &str,
    resolver: &R,
    options: &IncludeOptions,
    state: &mut IncludeState,
) -> String {
    include_at_depth(content, current_file, resolver, options, state, 0)
}

fn include_at_depth<R: FileResolver + ?Sized>(
    content: &str,
    current_file: &str,
    resolver: &R,
    options: &IncludeOptions,
    state: &mut IncludeState,
    depth: usize,
) -> String {
    rewrite_commands(content, &mut |cmd| {
        if !INCLUDE_COMMANDS.contains(cmd.name) {
            return None;
        }
        let requested = cmd.first_required()?.trim();
        if requested.is_empty() {
            return Some(String::new());
        }

        if depth >= options.max_depth {
            warn!(requested, depth, "include nesting too deep");
            state.too_deep.push(requested.to_string());
            return Some(String::new());
        }

        let path = resolver.resolve_path(current_file, requested);
        match resolver.read_file(&path) {
            Ok(included) => {
                debug!(%path, bytes = included.len(), "including file");
                state.included.push(path.clone());
                let included = if options.strip_comments {
                    remove_comments(&included)
                } else {
                    included
                };
                Some(include_at_depth(
                    &included,
                    &path,
                    resolver,
                    options,
                    state,
                    depth + 1,
                ))
            }
            Err(err) => {
                warn!(%path, %err, "cannot resolve include");
                state.record_missing(&path);
                Some(String::new())
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::files::{MemoryFileResolver, NoopFileResolver};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_input() {
        let resolver = MemoryFileResolver::new().with_file("intro.tex", "Included text");
        let mut state = IncludeState::new();
        let result = process_includes(
            r"Before \input{intro} after",
            "main.tex",
            &resolver,
            &IncludeOptions::default(),
            &mut state,
        );
        assert_eq!(result, "Before Included text after");
        assert_eq!(state.included, vec!["intro"]);
        assert!(state.not_found.is_empty());
    }

    #[test]
    fn test_nested_includes() {
        let resolver = MemoryFileResolver::new()
            .with_file("level1.tex", r"L1 \include{level2}")
            .with_file("level2.tex", "L2 % hidden\n");
        let mut state = IncludeState::new();
        let result = process_includes(
            r"\input{level1}",
            "main.tex",
            &resolver,
            &IncludeOptions::default(),
            &mut state,
        );
        assert_eq!(result, "L1 L2\n");
        assert_eq!(state.included.len(), 2);
    }

    #[test]
    fn test_relative_to_including_file() {
        let resolver = MemoryFileResolver::new()
            .with_file("book/ch1.tex", r"\input{sec}")
            .with_file("book/sec.tex", "deep");
        let mut state = IncludeState::new();
        let result = process_includes(
            r"\input{ch1}",
            "book/main.tex",
            &resolver,
            &IncludeOptions::default(),
            &mut state,
        );
        assert_eq!(result, "deep");
    }

    #[test]
    fn test_missing_file_recorded_once() {
        let mut state = IncludeState::new();
        let result = process_includes(
            r"A \input{gone} B \input{gone}",
            "main.tex",
            &NoopFileResolver,
            &IncludeOptions::default(),
            &mut state,
        );
        assert_eq!(result, "A  B ");
        assert_eq!(state.not_found, vec!["gone"]);
    }

    #[test]
    fn test_cycle_is_cut() {
        let resolver = MemoryFileResolver::new().with_file("self.tex", r"x\input{self}");
        let mut state = IncludeState::new();
        let options = IncludeOptions {
            max_depth: 3,
            strip_comments: true,
        };
        let result = process_includes(r"\input{self}", "main.tex", &resolver, &options, &mut state);
        assert_eq!(result, "xxx");
        assert_eq!(state.too_deep, vec!["self"]);
    }

    #[test]
    fn test_other_commands_untouched() {
        let mut state = IncludeState::new();
        let text = r"\textbf{\input{x}} \emph{y}";
        let resolver = MemoryFileResolver::new().with_file("x.tex", "X");
        let result = process_includes(text, "main.tex", &resolver, &IncludeOptions::default(), &mut state);
        assert_eq!(result, r"\textbf{X} \emph{y}");
    }
}
