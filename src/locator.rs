//! The entry point: header passthrough, then function lookup, lexical
//! fallback, and class lookup, in that order.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Error;
use crate::extract;
use crate::fallback;
use crate::grammar::{Dialect, FileClass};
use crate::reader::SourceFile;
use crate::resolver;
use crate::types::{EntityKind, Extent, LookupKind, SourceLocation};

/// Locates entities in C and C++ files. Holds configuration only; every
/// request reads and parses its file from scratch.
#[derive(Debug, Clone, Default)]
pub struct Locator {
    /// Limits and strategy switches.
    config: Config,
}

impl Locator {
    /// Create a locator with the given configuration.
    pub const fn new(config: Config) -> Self {
        return Self { config };
    }

    /// Locate `entity` in `path` and render it.
    ///
    /// Headers are returned whole. Source files are searched for a function,
    /// then scanned lexically if the parse was unusable, then searched for a class.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedExtension` before any I/O for extensions other
    /// than `.c`, `.cpp`, and `.h`; `Error::FileNotFound`, `Error::FileTooLarge`, or
    /// `Error::Io` from reading; `Error::EmptyFile` for an empty header; and
    /// `Error::EntityNotFound` once every strategy is exhausted.
    pub fn locate(&self, path: &Path, entity: &str) -> Result<SourceLocation, Error> {
        let class = FileClass::for_path(path)?;
        let file = self.read(path)?;
        return self.locate_in(&file, class, entity);
    }

    /// Read a file under this locator's size limit.
    ///
    /// # Errors
    ///
    /// Returns `Error::FileNotFound`, `Error::FileTooLarge`, or `Error::Io`.
    pub fn read(&self, path: &Path) -> Result<SourceFile, Error> {
        return SourceFile::read(path, self.config.max_file_bytes);
    }

    /// Locate `entity` in a file that has already been classified and read.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyFile` for an empty header and `Error::EntityNotFound`
    /// once every strategy is exhausted.
    pub fn locate_in(
        &self,
        file: &SourceFile,
        class: FileClass,
        entity: &str,
    ) -> Result<SourceLocation, Error> {
        return match class {
            FileClass::Header => header_passthrough(file, entity),
            FileClass::Source(dialect) => self.search(file, dialect, entity),
        };
    }

    /// Like [`Locator::locate`], but always answers with text: the numbered
    /// source on success, the error message otherwise.
    pub fn locate_text(&self, path: &Path, entity: &str) -> String {
        return match self.locate(path, entity) {
            Err(e) => e.to_string(),
            Ok(location) => location.numbered_source,
        };
    }

    /// Run the lookup strategies against an already-read source file.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if no strategy finds the entity.
    pub fn search(
        &self,
        file: &SourceFile,
        dialect: Dialect,
        entity: &str,
    ) -> Result<SourceLocation, Error> {
        debug!(file = %file.path().display(), entity, ?dialect, "resolving function");

        match resolver::resolve(file, dialect, LookupKind::FunctionLike, entity) {
            Ok(extent) => return Ok(build_location(file, entity, EntityKind::Function, extent)),
            Err(Error::EntityNotFound { .. }) => {
                debug!(entity, "no function definition, trying class lookup");
            },
            Err(e) if e.is_recoverable() => {
                if let Some(location) = self.try_fallback(file, entity, &e) {
                    return Ok(location);
                }
            },
            Err(e) => return Err(e),
        }

        match resolver::resolve(file, dialect, LookupKind::ClassLike, entity) {
            Ok(extent) => return Ok(build_location(file, entity, EntityKind::Class, extent)),
            Err(e) if e.is_recoverable() => debug!(entity, error = %e, "class lookup failed"),
            Err(e) => return Err(e),
        }

        info!(file = %file.path().display(), entity, "entity not found by any strategy");
        return Err(Error::EntityNotFound {
            entity: entity.to_string(),
            file: file.path().to_path_buf(),
        });
    }

    /// Lexical scan after a failed structural parse. `None` if disabled or not found.
    fn try_fallback(&self, file: &SourceFile, entity: &str, cause: &Error) -> Option<SourceLocation> {
        if !self.config.lexical_fallback {
            debug!(error = %cause, "structural resolution failed, lexical fallback disabled");
            return None;
        }

        warn!(error = %cause, "structural resolution failed, using lexical fallback");
        return match fallback::scan(file.path(), file.lines(), entity) {
            Err(e) => {
                debug!(error = %e, "lexical fallback found nothing");
                None
            },
            Ok(extent) => Some(build_location(file, entity, EntityKind::Function, extent)),
        };
    }
}

/// Return a header whole, without looking for the entity.
///
/// # Errors
///
/// Returns `Error::EmptyFile` if the header has no lines.
fn header_passthrough(file: &SourceFile, entity: &str) -> Result<SourceLocation, Error> {
    if file.line_count() == 0 {
        return Err(Error::EmptyFile { path: file.path().to_path_buf() });
    }
    let extent = Extent::whole_file(file.line_count());
    return Ok(build_location(file, entity, EntityKind::Header, extent));
}

/// Render an extent into the result shape.
fn build_location(
    file: &SourceFile,
    entity: &str,
    kind: EntityKind,
    extent: Extent,
) -> SourceLocation {
    let snippet = extract::extract(file.lines(), extent);
    return SourceLocation {
        entity_name: entity.to_string(),
        extent,
        filename: file.path().to_path_buf(),
        kind,
        non_blank_lines: snippet.non_blank_lines,
        numbered_source: snippet.numbered_source,
    };
}
