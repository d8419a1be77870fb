//! Citation numbering
//!
//! Replaces `\cite`-family commands by bracketed references. Keys are
//! numbered by first appearance, so `\cite{b} \cite{a,b}` reads
//! `[1] [2, 1]`.

use indexmap::IndexMap;
use tracing::debug;

use super::placeholders::PlaceholderStore;
use crate::core::args::{rewrite_commands, TexCommand};
use crate::data::commands::CITE_COMMANDS;

/// How a citation is written in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CitationFormat {
    /// `[1, 2]`
    #[default]
    Numbered,
    /// `[knuth84, lamport94]`
    Keys,
}

/// Citation keys in order of first appearance
#[derive(Debug, Clone, Default)]
pub struct CitationRegistry {
    numbers: IndexMap<String, usize>,
}

impl CitationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `key`, assigning the next free one on first use
    pub fn number(&mut self, key: &str) -> usize {
        let next = self.numbers.len() + 1;
        *self.numbers.entry(key.to_string()).or_insert(next)
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.numbers.get(key).copied()
    }

    /// Keys in numbering order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.numbers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// natbib/biblatex notes: one optional argument is a postnote, two are
/// prenote and postnote
///
/// Slots are assigned by position before empty notes are dropped, so
/// `[see][]` is a prenote only.
fn citation_notes<'a>(cmd: &TexCommand<'a>) -> (Option<&'a str>, Option<&'a str>) {
    let notes: Vec<&str> = cmd.optional().collect();
    let (pre, post) = match notes.as_slice() {
        [post] => (None, Some(*post)),
        [pre, post, ..] => (Some(*pre), Some(*post)),
        [] => (None, None),
    };
    let filled = |note: Option<&'a str>| note.filter(|n| !n.trim().is_empty());
    (filled(pre), filled(post))
}

fn render_citation(
    cmd: &TexCommand<'_>,
    format: CitationFormat,
    registry: &mut CitationRegistry,
) -> String {
    let keys = cmd
        .required()
        .flat_map(|keys| keys.split(','))
        .map(str::trim)
        .filter(|key| !key.is_empty());

    let mut parts: Vec<String> = keys
        .map(|key| match format {
            CitationFormat::Numbered => registry.number(key).to_string(),
            CitationFormat::Keys => {
                registry.number(key);
                key.to_string()
            }
        })
        .collect();

    let (prenote, postnote) = citation_notes(cmd);
    if let Some(post) = postnote {
        parts.push(post.replace('~', " ").trim().to_string());
    }
    let body = parts.join(", ");
    match prenote {
        Some(pre) => format!("[{} {}]", pre.replace('~', " ").trim(), body),
        None => format!("[{}]", body),
    }
}

/// Replace every citation command in `text`
pub fn number_citations(
    text: &str,
    format: CitationFormat,
    registry: &mut CitationRegistry,
    store: &mut PlaceholderStore,
) -> String {
    let output = rewrite_commands(text, &mut |cmd| {
        if !CITE_COMMANDS.contains(cmd.name) {
            return None;
        }
        let rendered = render_citation(cmd, format, registry);
        Some(store.protect(rendered))
    });
    debug!(keys = registry.len(), "numbered citations");
    output
}
