//! Core scanning modules
//!
//! This module contains the LaTeX command scanner and tag-rewriting engine:
//! - `lexer`: commands with and without argument groups
//! - `delimiters`: symmetric single-character delimiter pairs (`$...$`)
//! - `tags`: marker insertion at span boundaries
//! - `args`: structured command/argument records

pub mod args;
pub mod delimiters;
pub mod lexer;
pub mod tags;

pub use args::{
    get_tex_commands_args, group_command_spans, rewrite_commands, visit_commands, Argument,
    TexCommand,
};
pub use delimiters::{find_tex_command_char, DelimiterSpan};
pub use lexer::{find_tex_commands, find_tex_commands_noargv, BareSpan, CommandSpan, GroupKind};
pub use tags::{
    apply_tag_between_inside_char_command, apply_tag_tex_commands, apply_tag_tex_commands_no_argv,
    tag_bare_spans, tag_command_spans, tag_delimiter_spans, BareMarkers, CommandMarkers,
    DelimiterMarkers, Markers,
};
