/// Tree-sitter grammar selection and file classification by extension.
use std::path::Path;

use tree_sitter::Language;

use crate::error::Error;

/// Language mode a translation unit is parsed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// ISO C.
    C,
    /// C++. Required for class lookups.
    Cpp,
}

impl Dialect {
    /// The tree-sitter grammar for this dialect.
    pub fn language(self) -> Language {
        return match self {
            Self::C => tree_sitter_c::LANGUAGE.into(),
            Self::Cpp => tree_sitter_cpp::LANGUAGE.into(),
        };
    }
}

/// What a request against a file is allowed to do, decided by extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// Header: passed through whole, never searched.
    Header,
    /// Translation unit searched for entities in the given dialect.
    Source(Dialect),
}

impl FileClass {
    /// Classify a path by its extension. Does not touch the filesystem.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedExtension` for anything but `.c`, `.cpp`, or `.h`.
    pub fn for_path(path: &Path) -> Result<Self, Error> {
        let ext = path.extension().and_then(|e| return e.to_str()).unwrap_or("");

        return match ext {
            "c" => Ok(Self::Source(Dialect::C)),
            "cpp" => Ok(Self::Source(Dialect::Cpp)),
            "h" => Ok(Self::Header),
            _ => Err(Error::UnsupportedExtension {
                ext: ext.to_string(),
                path: path.to_path_buf(),
            }),
        };
    }

    /// Dialect used when listing definitions: headers are read as C++.
    pub const fn listing_dialect(self) -> Dialect {
        return match self {
            Self::Header => Dialect::Cpp,
            Self::Source(dialect) => dialect,
        };
    }
}
