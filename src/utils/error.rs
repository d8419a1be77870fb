//! Error handling for texstrip
//!
//! Scanning itself never fails: malformed LaTeX is skipped on a best-effort
//! basis. Errors are reserved for caller-contract violations (wrong marker
//! arity), include resolution, configuration, strict-mode warnings and I/O.

use std::fmt;

/// texstrip error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TexError {
    /// A caller passed an argument that breaks an API contract
    InvalidArgument { message: String },
    /// An included file could not be resolved or read
    Include { path: String, message: String },
    /// Configuration could not be loaded
    Config { message: String },
    /// A warning raised while running in strict mode
    Strict { message: String },
    /// IO error (for file operations)
    Io { message: String },
}

impl fmt::Display for TexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TexError::InvalidArgument { message } => write!(f, "Invalid argument: {}", message),
            TexError::Include { path, message } => {
                write!(f, "Cannot include '{}': {}", path, message)
            }
            TexError::Config { message } => write!(f, "Configuration error: {}", message),
            TexError::Strict { message } => write!(f, "Strict mode: {}", message),
            TexError::Io { message } => write!(f, "IO error: {}", message),
        }
    }
}

impl std::error::Error for TexError {}

impl From<std::io::Error> for TexError {
    fn from(err: std::io::Error) -> Self {
        TexError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for texstrip operations
pub type TexResult<T> = Result<T, TexError>;

// Convenience constructors
impl TexError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        TexError::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn include(path: impl Into<String>, message: impl Into<String>) -> Self {
        TexError::Include {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        TexError::Config {
            message: message.into(),
        }
    }

    pub fn strict(message: impl Into<String>) -> Self {
        TexError::Strict {
            message: message.into(),
        }
    }
}

/// Kind of non-fatal issue found while stripping a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// `\ref` to a label that is never defined
    UnknownReference,
    /// `\input` / `\include` target that could not be read
    MissingInclude,
    /// Include nesting went deeper than allowed
    IncludeDepth,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnknownReference => write!(f, "unknown reference"),
            WarningKind::MissingInclude => write!(f, "missing include"),
            WarningKind::IncludeDepth => write!(f, "include depth"),
        }
    }
}

/// A non-fatal issue reported by the pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineWarning {
    pub kind: WarningKind,
    pub message: String,
}

impl PipelineWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for PipelineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Warning ({}): {}", self.kind, self.message)
    }
}

/// Pipeline output with collected warnings
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The stripped (or annotated) text
    pub content: String,
    /// Any warnings generated along the way
    pub warnings: Vec<PipelineWarning>,
}

impl PipelineOutput {
    pub fn new(content: String) -> Self {
        Self {
            content,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(content: String, warnings: Vec<PipelineWarning>) -> Self {
        Self { content, warnings }
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
