//! Protected replacement text
//!
//! Stages that produce final plain text (numbered citations, math
//! placeholders) must keep later stages from scanning it again: a rendered
//! `[1]` right after `\textbf{x} ` would otherwise be read as an optional
//! argument. Such text is parked in a [`PlaceholderStore`] and a token made
//! of private-use characters is left in the document instead. The last
//! pipeline stage swaps the tokens back.

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

/// Parked replacement texts, indexed by their token number
#[derive(Debug, Clone, Default)]
pub struct PlaceholderStore {
    values: Vec<String>,
}

impl PlaceholderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park `value` and return the token standing in for it
    pub fn protect(&mut self, value: impl Into<String>) -> String {
        self.values.push(value.into());
        format!("{}{}{}", OPEN, self.values.len() - 1, CLOSE)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace every token in `text` by its parked value
    ///
    /// Tokens that do not belong to this store are dropped.
    pub fn restore(&self, text: &str) -> String {
        if self.values.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(open) = rest.find(OPEN) {
            output.push_str(&rest[..open]);
            let after = &rest[open + OPEN.len_utf8()..];
            match after.find(CLOSE) {
                Some(close) => {
                    if let Some(value) = after[..close]
                        .parse::<usize>()
                        .ok()
                        .and_then(|i| self.values.get(i))
                    {
                        output.push_str(value);
                    }
                    rest = &after[close + CLOSE.len_utf8()..];
                }
                None => {
                    rest = after;
                }
            }
        }
        output.push_str(rest);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let mut store = PlaceholderStore::new();
        let a = store.protect("[1]");
        let b = store.protect("[math]");
        let text = format!("see {} and {}.", a, b);
        assert_eq!(store.restore(&text), "see [1] and [math].");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_tokens_survive_command_scanning() {
        let mut store = PlaceholderStore::new();
        let token = store.protect("[1]");
        let text = format!(r"\textbf{{x}} {}", token);
        let commands = crate::core::get_tex_commands_args(&text);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].arguments.len(), 1);
    }

    #[test]
    fn test_empty_store_is_identity() {
        let store = PlaceholderStore::new();
        assert_eq!(store.restore("plain"), "plain");
    }
}
