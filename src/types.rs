/// Core domain types for srcsnip lookups, extents, and results.
use std::path::PathBuf;

use serde::Serialize;

/// Inclusive, one-based line range of an entity in its source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Extent {
    /// Last line of the entity (inclusive).
    pub end: usize,
    /// First line of the entity.
    pub start: usize,
}

impl Extent {
    /// Build an extent from its inclusive bounds.
    pub const fn new(start: usize, end: usize) -> Self {
        return Self { end, start };
    }

    /// Extent covering a whole file of `total_lines` lines.
    pub const fn whole_file(total_lines: usize) -> Self {
        return Self { end: total_lines, start: 1 };
    }

    /// Whether this extent addresses a non-empty slice of a file with `total_lines` lines.
    pub const fn fits(&self, total_lines: usize) -> bool {
        return 1 <= self.start && self.start <= self.end && self.end <= total_lines;
    }

    /// Number of lines covered.
    pub const fn line_count(&self) -> usize {
        return self.end.saturating_sub(self.start).saturating_add(1);
    }
}

/// Which declaration kinds a structural lookup accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Class and struct definitions.
    ClassLike,
    /// Free functions and methods.
    FunctionLike,
}

/// How a snippet was produced. Reports the strategy that matched, which
/// is not always the language-level category of the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Matched by a class/struct lookup.
    Class,
    /// Matched by a function lookup or the lexical fallback.
    Function,
    /// Whole header file passed through without a lookup.
    Header,
}

impl EntityKind {
    /// Lowercase label used in listings.
    pub const fn label(self) -> &'static str {
        return match self {
            Self::Class => "class",
            Self::Function => "function",
            Self::Header => "header",
        };
    }
}

/// A named definition found by walking a parsed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Line range of the definition.
    pub extent: Extent,
    /// Class or function.
    pub kind: EntityKind,
    /// Unqualified spelled identifier.
    pub name: String,
}

/// The result of a successful lookup. Built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    /// Requested identifier, echoed verbatim.
    pub entity_name: String,
    /// Line range the snippet was cut from.
    pub extent: Extent,
    /// File the snippet was taken from.
    pub filename: PathBuf,
    /// How the snippet was produced.
    pub kind: EntityKind,
    /// Extracted lines, trimmed, with blank lines dropped.
    pub non_blank_lines: Vec<String>,
    /// Extracted lines as `<line>: <text>`, newline-joined.
    pub numbered_source: String,
}
