//! Command tables for plain-text rendering
//!
//! Static lookup tables describing what happens to a LaTeX command when a
//! document is flattened to plain text.

use phf::{phf_map, phf_set};

/// How a command with arguments is rendered as plain text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandRole {
    /// Keep the last mandatory argument (`\textbf{x}` → `x`)
    Text,
    /// Title on its own paragraph (`\section{Intro}`)
    Heading,
    /// Kept inline in parentheses (`\footnote{x}` → ` (x)`)
    Footnote,
    /// List item, optional label kept (`\item[a)]` → `a)`)
    Item,
    /// Removed together with all of its arguments
    Drop,
    /// Unknown command: all mandatory arguments kept, in order
    Generic,
}

/// Commands with a known plain-text role
///
/// Commands not listed here default to [`CommandRole::Generic`].
pub static COMMAND_ROLES: phf::Map<&'static str, CommandRole> = phf_map! {
    // Font and emphasis
    "textbf" => CommandRole::Text,
    "textit" => CommandRole::Text,
    "textsl" => CommandRole::Text,
    "textsc" => CommandRole::Text,
    "texttt" => CommandRole::Text,
    "textsf" => CommandRole::Text,
    "textrm" => CommandRole::Text,
    "textup" => CommandRole::Text,
    "textmd" => CommandRole::Text,
    "emph" => CommandRole::Text,
    "underline" => CommandRole::Text,
    "uline" => CommandRole::Text,
    "mbox" => CommandRole::Text,
    "hbox" => CommandRole::Text,
    "text" => CommandRole::Text,
    "textcolor" => CommandRole::Text,
    "colorbox" => CommandRole::Text,
    "href" => CommandRole::Text,
    "url" => CommandRole::Text,
    "caption" => CommandRole::Heading,

    // Sectioning
    "part" => CommandRole::Heading,
    "chapter" => CommandRole::Heading,
    "section" => CommandRole::Heading,
    "subsection" => CommandRole::Heading,
    "subsubsection" => CommandRole::Heading,
    "paragraph" => CommandRole::Heading,
    "subparagraph" => CommandRole::Heading,
    "title" => CommandRole::Heading,

    // Notes
    "footnote" => CommandRole::Footnote,
    "footnotetext" => CommandRole::Footnote,
    "marginpar" => CommandRole::Footnote,

    "item" => CommandRole::Item,

    // Preamble, layout and floats
    "documentclass" => CommandRole::Drop,
    "usepackage" => CommandRole::Drop,
    "RequirePackage" => CommandRole::Drop,
    "newcommand" => CommandRole::Drop,
    "renewcommand" => CommandRole::Drop,
    "providecommand" => CommandRole::Drop,
    "newenvironment" => CommandRole::Drop,
    "renewenvironment" => CommandRole::Drop,
    "DeclareMathOperator" => CommandRole::Drop,
    "setlength" => CommandRole::Drop,
    "addtolength" => CommandRole::Drop,
    "setcounter" => CommandRole::Drop,
    "addtocounter" => CommandRole::Drop,
    "vspace" => CommandRole::Drop,
    "hspace" => CommandRole::Drop,
    "includegraphics" => CommandRole::Drop,
    "label" => CommandRole::Drop,
    "bibliography" => CommandRole::Drop,
    "bibliographystyle" => CommandRole::Drop,
    "bibitem" => CommandRole::Drop,
    "pagestyle" => CommandRole::Drop,
    "thispagestyle" => CommandRole::Drop,
    "color" => CommandRole::Drop,
    "author" => CommandRole::Drop,
    "date" => CommandRole::Drop,
    "begin" => CommandRole::Drop,
    "end" => CommandRole::Drop,
};

/// Bare commands with a plain-text replacement
///
/// Bare commands not listed here are removed.
pub static SYMBOL_COMMANDS: phf::Map<&'static str, &'static str> = phf_map! {
    "LaTeX" => "LaTeX",
    "LaTeXe" => "LaTeX2e",
    "TeX" => "TeX",
    "BibTeX" => "BibTeX",
    "ldots" => "...",
    "dots" => "...",
    "textellipsis" => "...",
    "textbackslash" => "\\",
    "textasciitilde" => "~",
    "textasciicircum" => "^",
    "textbar" => "|",
    "textless" => "<",
    "textgreater" => ">",
    "textendash" => "–",
    "textemdash" => "—",
    "textquoteleft" => "‘",
    "textquoteright" => "’",
    "S" => "§",
    "P" => "¶",
    "copyright" => "©",
    "textregistered" => "®",
    "texttrademark" => "™",
    "euro" => "€",
    "pounds" => "£",
    "ss" => "ß",
    "ae" => "æ",
    "AE" => "Æ",
    "oe" => "œ",
    "OE" => "Œ",
    "o" => "ø",
    "O" => "Ø",
    "aa" => "å",
    "AA" => "Å",
    "i" => "ı",
    "item" => "-",
    "par" => "\n\n",
    "newline" => "\n",
    "linebreak" => "\n",
    "newpage" => "\n\n",
    "clearpage" => "\n\n",
    "quad" => " ",
    "qquad" => " ",
    "space" => " ",
};

/// Citation commands, replaced by numbered references
pub static CITE_COMMANDS: phf::Set<&'static str> = phf_set! {
    "cite",
    "citep",
    "citet",
    "citealp",
    "citealt",
    "parencite",
    "textcite",
    "autocite",
    "footcite",
    "supercite",
};

/// How a cross-reference number is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefStyle {
    /// `3`
    Plain,
    /// `(3)`, as `\eqref` does
    Parenthesized,
}

/// Cross-reference commands
pub static REF_COMMANDS: phf::Map<&'static str, RefStyle> = phf_map! {
    "ref" => RefStyle::Plain,
    "autoref" => RefStyle::Plain,
    "cref" => RefStyle::Plain,
    "Cref" => RefStyle::Plain,
    "nameref" => RefStyle::Plain,
    "pageref" => RefStyle::Plain,
    "vref" => RefStyle::Plain,
    "eqref" => RefStyle::Parenthesized,
};

/// Commands pulling another source file into the document
pub static INCLUDE_COMMANDS: phf::Set<&'static str> = phf_set! {
    "input",
    "include",
    "subfile",
};

/// Sectioning commands by nesting level (0 = outermost)
pub static SECTION_LEVELS: phf::Map<&'static str, usize> = phf_map! {
    "chapter" => 0,
    "section" => 1,
    "subsection" => 2,
    "subsubsection" => 3,
};

/// Environments whose content is numbered as an equation
pub static EQUATION_ENVIRONMENTS: phf::Set<&'static str> = phf_set! {
    "equation",
    "align",
    "gather",
    "multline",
    "eqnarray",
    "flalign",
    "alignat",
};

/// Equation environments that number every row rather than the whole block
pub static ROW_NUMBERED_ENVIRONMENTS: phf::Set<&'static str> = phf_set! {
    "align",
    "gather",
    "eqnarray",
    "flalign",
    "alignat",
};

/// Theorem-like environments sharing one counter
pub static THEOREM_ENVIRONMENTS: phf::Set<&'static str> = phf_set! {
    "theorem",
    "lemma",
    "proposition",
    "corollary",
    "definition",
    "example",
    "remark",
    "conjecture",
};

/// Display-math environments replaced by the math placeholder
pub static MATH_ENVIRONMENTS: phf::Set<&'static str> = phf_set! {
    "equation",
    "equation*",
    "align",
    "align*",
    "gather",
    "gather*",
    "multline",
    "multline*",
    "eqnarray",
    "eqnarray*",
    "flalign",
    "flalign*",
    "alignat",
    "alignat*",
    "displaymath",
    "math",
};

/// Environments removed with their content by default
pub const DEFAULT_IGNORED_ENVIRONMENTS: &[&str] = &[
    "array",
    "comment",
    "lstlisting",
    "longtable",
    "minted",
    "picture",
    "pspicture",
    "tabular",
    "tabularx",
    "tikzpicture",
    "verbatim",
];

/// Look up the role of a command, defaulting to [`CommandRole::Generic`]
pub fn command_role(name: &str) -> CommandRole {
    COMMAND_ROLES.get(name).copied().unwrap_or(CommandRole::Generic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles() {
        assert_eq!(command_role("textbf"), CommandRole::Text);
        assert_eq!(command_role("section"), CommandRole::Heading);
        assert_eq!(command_role("usepackage"), CommandRole::Drop);
        assert_eq!(command_role("unknownmacro"), CommandRole::Generic);
    }

    #[test]
    fn test_tables_are_consistent() {
        for name in SECTION_LEVELS.keys() {
            assert_eq!(command_role(name), CommandRole::Heading);
        }
        for env in EQUATION_ENVIRONMENTS.iter() {
            assert!(MATH_ENVIRONMENTS.contains(*env));
        }
        for env in ROW_NUMBERED_ENVIRONMENTS.iter() {
            assert!(EQUATION_ENVIRONMENTS.contains(*env));
        }
        assert!(CITE_COMMANDS.contains("citep"));
        assert_eq!(REF_COMMANDS.get("eqref"), Some(&RefStyle::Parenthesized));
    }
}
