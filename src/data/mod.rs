//! Data layer - Static command tables
//!
//! This module contains the static data used to flatten LaTeX to text:
//! - Command roles (text, heading, footnote, item, drop)
//! - Symbol replacements for bare commands
//! - Citation, reference and include commands
//! - Math, equation and ignored environments

pub mod commands;

// Re-export commonly used items
pub use commands::{
    command_role, CommandRole, RefStyle, CITE_COMMANDS, COMMAND_ROLES,
    DEFAULT_IGNORED_ENVIRONMENTS, EQUATION_ENVIRONMENTS, INCLUDE_COMMANDS, MATH_ENVIRONMENTS,
    REF_COMMANDS, ROW_NUMBERED_ENVIRONMENTS, SECTION_LEVELS, SYMBOL_COMMANDS, THEOREM_ENVIRONMENTS,
};
