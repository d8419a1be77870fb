//! Feature modules - Pipeline stages
//!
//! This module contains the stages that turn a LaTeX document into text:
//! - Comment removal and include resolution
//! - Citation numbering and cross-reference resolution
//! - Environment, math and markup removal
//! - Whitespace normalization
//! - Source annotation (used instead of stripping)

pub mod annotate;
pub mod citations;
pub mod comments;
pub mod environments;
pub mod includes;
pub mod markup;
pub mod math;
pub mod placeholders;
pub mod references;
pub mod whitespace;

// Re-export commonly used types
pub use annotate::{annotate_latex, AnnotationMarkers, AnnotationStyle};
pub use citations::{CitationFormat, CitationRegistry};
pub use includes::{IncludeOptions, IncludeState};
pub use placeholders::PlaceholderStore;
pub use references::{LabelKind, ReferenceIndex};
