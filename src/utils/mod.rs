//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Error, warning and result types
//! - File resolution for multi-file documents

pub mod error;
pub mod files;

// Re-export commonly used items
pub use error::{PipelineOutput, PipelineWarning, TexError, TexResult, WarningKind};
pub use files::{
    FileResolveError, FileResolver, MemoryFileResolver, NoopFileResolver, StdFileResolver,
};
