//! Cross-reference resolution
//!
//! Numbers every `\label` the way LaTeX would on a first run and replaces
//! `\ref`-family commands by those numbers. Labels are then removed.

use fxhash::FxHashMap;
use tracing::{debug, warn};

use super::environments::{environment_name, matching_end};
use crate::core::args::{get_tex_commands_args, rewrite_commands, visit_commands, TexCommand};
use crate::core::lexer::find_tex_commands_noargv;
use crate::data::commands::{
    RefStyle, EQUATION_ENVIRONMENTS, REF_COMMANDS, ROW_NUMBERED_ENVIRONMENTS, SECTION_LEVELS,
    THEOREM_ENVIRONMENTS,
};
use crate::utils::error::{PipelineWarning, WarningKind};

/// What a label points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    Section,
    Figure,
    Table,
    Equation,
    Theorem,
}

impl LabelKind {
    fn of_environment(name: &str) -> Option<Self> {
        match name {
            "figure" | "figure*" | "wrapfigure" => Some(LabelKind::Figure),
            "table" | "table*" | "wraptable" => Some(LabelKind::Table),
            _ if EQUATION_ENVIRONMENTS.contains(name) => Some(LabelKind::Equation),
            _ if THEOREM_ENVIRONMENTS.contains(name) => Some(LabelKind::Theorem),
            _ => None,
        }
    }
}

/// A numbered label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub kind: LabelKind,
    pub number: String,
}

/// All labels of a document
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    labels: FxHashMap<String, Label>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a label; the first definition of a key wins
    pub fn register(&mut self, key: &str, kind: LabelKind, number: String) {
        if self.labels.contains_key(key) {
            debug!(key, "duplicate label ignored");
            return;
        }
        self.labels.insert(key.to_string(), Label { kind, number });
    }

    pub fn get(&self, key: &str) -> Option<&Label> {
        self.labels.get(key)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Hierarchical section counter, e.g. `2.1`
#[derive(Debug, Default)]
struct SectionCounter {
    /// Outermost level used in the document
    top: usize,
    counts: [usize; 4],
}

impl SectionCounter {
    fn step(&mut self, level: usize) {
        self.counts[level] += 1;
        for count in &mut self.counts[level + 1..] {
            *count = 0;
        }
    }

    fn current(&self) -> Option<String> {
        let deepest = self.counts.iter().rposition(|&count| count > 0)?;
        let parts: Vec<String> = self.counts[self.top.min(deepest)..=deepest]
            .iter()
            .map(|count| count.to_string())
            .collect();
        Some(parts.join("."))
    }
}

/// Rows of an alignment body, split at `\\` outside groups and nested
/// environments
fn split_rows(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut rows = Vec::new();
    let mut depth = 0i32;
    let mut nested = 0i32;
    let mut start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => depth += 1,
            b'}' => depth -= 1,
            b'\\' => {
                let rest = &body[pos..];
                if rest.starts_with("\\begin{") {
                    nested += 1;
                } else if rest.starts_with("\\end{") {
                    nested -= 1;
                } else if rest.starts_with("\\\\") && depth == 0 && nested == 0 {
                    rows.push(&body[start..pos]);
                    start = pos + 2;
                }
                pos += 2;
                continue;
            }
            _ => {}
        }
        pos += 1;
    }
    rows.push(&body[start..]);
    rows
}

/// Whether a row carries an equation number
fn is_numbered_row(row: &str) -> bool {
    !row.trim().is_empty()
        && !find_tex_commands_noargv(row)
            .iter()
            .any(|span| matches!(span.name(row), "nonumber" | "notag"))
}

#[derive(Debug)]
struct Frame {
    name: String,
}

#[derive(Debug, Default)]
struct LabelCollector {
    index: ReferenceIndex,
    sections: SectionCounter,
    counters: FxHashMap<LabelKind, usize>,
    environments: Vec<Frame>,
}

impl LabelCollector {
    /// Visit commands in document order; row-numbered environments are
    /// numbered row by row
    fn walk(&mut self, text: &str) {
        let commands = get_tex_commands_args(text);
        let mut i = 0;
        while i < commands.len() {
            let cmd = &commands[i];
            i += 1;

            if let Some(name) = environment_name(cmd, "begin") {
                if ROW_NUMBERED_ENVIRONMENTS.contains(name) {
                    if let Some(close) = matching_end(&commands, i - 1, name) {
                        self.number_rows(&text[cmd.end..commands[close].start]);
                        i = close + 1;
                        continue;
                    }
                }
            }

            self.visit(cmd);
            for arg in &cmd.arguments {
                self.walk(arg.text);
            }
        }
    }

    fn number_rows(&mut self, body: &str) {
        for row in split_rows(body) {
            let counter = self.counters.entry(LabelKind::Equation).or_insert(0);
            if is_numbered_row(row) {
                *counter += 1;
            }
            let number = counter.to_string();

            let mut keys = Vec::new();
            visit_commands(row, &mut |cmd| {
                if cmd.name == "label" {
                    keys.extend(cmd.first_required().map(|key| key.trim().to_string()));
                }
            });
            for key in keys {
                self.index.register(&key, LabelKind::Equation, number.clone());
            }
        }
    }

    fn visit(&mut self, cmd: &TexCommand<'_>) {
        if let Some(&level) = SECTION_LEVELS.get(cmd.name) {
            if cmd.first_required().is_some() {
                self.sections.step(level);
            }
            return;
        }

        match cmd.name {
            "begin" => {
                let Some(name) = cmd.first_required() else { return };
                let name = name.trim();
                // starred variants are unnumbered and map to no kind
                if let Some(kind) = LabelKind::of_environment(name) {
                    *self.counters.entry(kind).or_insert(0) += 1;
                }
                self.environments.push(Frame {
                    name: name.to_string(),
                });
            }
            "end" => {
                let Some(name) = cmd.first_required() else { return };
                if let Some(pos) = self.environments.iter().rposition(|f| f.name == name.trim()) {
                    self.environments.truncate(pos);
                }
            }
            "label" => {
                if let Some(key) = cmd.first_required() {
                    self.label(key.trim());
                }
            }
            _ => {}
        }
    }

    fn label(&mut self, key: &str) {
        let kind = self
            .environments
            .iter()
            .rev()
            .find_map(|frame| LabelKind::of_environment(&frame.name));

        let (kind, number) = match kind {
            Some(kind) => {
                let count = self.counters.get(&kind).copied().unwrap_or(0);
                (kind, count.to_string())
            }
            None => match self.sections.current() {
                Some(number) => (LabelKind::Section, number),
                None => {
                    debug!(key, "label before any numbered unit");
                    return;
                }
            },
        };

        self.index.register(key, kind, number);
    }
}

/// Number every label in `text`
pub fn collect_labels(text: &str) -> ReferenceIndex {
    let mut top = usize::MAX;
    visit_commands(text, &mut |cmd| {
        if let Some(&level) = SECTION_LEVELS.get(cmd.name) {
            top = top.min(level);
        }
    });

    let mut collector = LabelCollector::default();
    collector.sections.top = if top == usize::MAX { 0 } else { top };
    collector.walk(text);
    collector.index
}

/// Replace references using a pre-built index and remove all labels
///
/// Unknown keys are written as `unknown` and reported in `warnings`.
pub fn resolve_references(
    text: &str,
    index: &ReferenceIndex,
    unknown: &str,
    warnings: &mut Vec<PipelineWarning>,
) -> String {
    rewrite_commands(text, &mut |cmd| {
        if cmd.name == "label" {
            return Some(String::new());
        }
        let style = REF_COMMANDS.get(cmd.name)?;
        let keys = cmd.first_required()?;

        let numbers: Vec<String> = keys
            .split(',')
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| match index.get(key) {
                Some(label) => label.number.clone(),
                None => {
                    warn!(key, "undefined reference");
                    warnings.push(PipelineWarning::new(
                        WarningKind::UnknownReference,
                        format!("undefined reference '{}'", key),
                    ));
                    unknown.to_string()
                }
            })
            .collect();

        let joined = numbers.join(", ");
        Some(match style {
            RefStyle::Plain => joined,
            RefStyle::Parenthesized => format!("({})", joined),
        })
    })
}

/// Number labels and resolve references in one call
pub fn number_references(
    text: &str,
    unknown: &str,
    warnings: &mut Vec<PipelineWarning>,
) -> String {
    let index = collect_labels(text);
    debug!(labels = index.len(), "collected labels");
    resolve_references(text, &index, unknown, warnings)
}
