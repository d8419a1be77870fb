//! Pipeline options

use crate::data::commands::DEFAULT_IGNORED_ENVIRONMENTS;
use crate::features::annotate::AnnotationStyle;
use crate::features::citations::CitationFormat;

/// Options controlling how LaTeX is turned into plain text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StripOptions {
    /// Remove `%` comments and `comment` environments
    /// Default: true
    pub remove_comments: bool,

    /// Keep only the text between `\begin{document}` and `\end{document}`
    /// when the input is a full document
    /// Default: true
    pub document_body_only: bool,

    /// Inline `\input`, `\include` and `\subfile` targets
    /// Default: true
    pub resolve_includes: bool,

    /// Maximum nesting of included files
    /// Default: 8
    pub max_include_depth: usize,

    /// Replace citation commands by numbered references
    /// Default: true
    pub number_citations: bool,

    /// Default: numbered
    pub citation_format: CitationFormat,

    /// Replace `\ref`-family commands by label numbers
    /// Default: true
    pub resolve_references: bool,

    /// Written for references to undefined labels
    /// Default: `??`
    pub unknown_reference: String,

    /// Written for every math region
    /// Default: `[math]`
    pub math_placeholder: String,

    /// Environments removed together with their content
    pub ignored_environments: Vec<String>,

    /// Annotate the source instead of stripping it
    /// Default: none
    pub annotate: Option<AnnotationStyle>,

    /// Collapse runs of blanks and blank lines
    /// Default: true
    pub collapse_whitespace: bool,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            remove_comments: true,
            document_body_only: true,
            resolve_includes: true,
            max_include_depth: 8,
            number_citations: true,
            citation_format: CitationFormat::Numbered,
            resolve_references: true,
            unknown_reference: "??".to_string(),
            math_placeholder: "[math]".to_string(),
            ignored_environments: DEFAULT_IGNORED_ENVIRONMENTS
                .iter()
                .map(|env| env.to_string())
                .collect(),
            annotate: None,
            collapse_whitespace: true,
        }
    }
}

impl StripOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Only remove markup: no includes, citations or references are
    /// resolved and whitespace is left alone
    pub fn minimal() -> Self {
        Self {
            resolve_includes: false,
            number_citations: false,
            resolve_references: false,
            collapse_whitespace: false,
            ..Self::default()
        }
    }

    /// Highlight commands and math in the source with terminal colors
    pub fn annotated() -> Self {
        Self {
            annotate: Some(AnnotationStyle::Ansi),
            ..Self::default()
        }
    }

    /// Load options from TOML; missing keys keep their defaults
    ///
    /// ```rust
    /// use texstrip::StripOptions;
    ///
    /// let options = StripOptions::from_toml_str("math_placeholder = \"<m>\"").unwrap();
    /// assert_eq!(options.math_placeholder, "<m>");
    /// assert!(options.remove_comments);
    /// ```
    #[cfg(feature = "config")]
    pub fn from_toml_str(source: &str) -> crate::utils::error::TexResult<Self> {
        toml::from_str(source).map_err(|err| crate::utils::error::TexError::config(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let default = StripOptions::new();
        assert!(default.number_citations);
        assert_eq!(default.unknown_reference, "??");
        assert!(default.ignored_environments.iter().any(|env| env == "verbatim"));

        let minimal = StripOptions::minimal();
        assert!(!minimal.resolve_includes);
        assert!(minimal.remove_comments);

        assert_eq!(StripOptions::annotated().annotate, Some(AnnotationStyle::Ansi));
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_from_toml() {
        let options = StripOptions::from_toml_str(
            r#"
            citation_format = "keys"
            ignored_environments = ["proof"]
            annotate = "ansi"
            "#,
        )
        .unwrap();
        assert_eq!(options.citation_format, CitationFormat::Keys);
        assert_eq!(options.ignored_environments, vec!["proof"]);
        assert_eq!(options.annotate, Some(AnnotationStyle::Ansi));
        assert_eq!(options.max_include_depth, 8);
    }

    #[cfg(feature = "config")]
    #[test]
    fn test_bad_toml_is_config_error() {
        let err = StripOptions::from_toml_str("max_include_depth = \"deep\"").unwrap_err();
        assert!(matches!(err, crate::utils::error::TexError::Config { .. }));
    }
}
