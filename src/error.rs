/// Crate-level error types for srcsnip.
use std::path::PathBuf;

/// Every error carries enough context to be read on its own: each variant
/// names the file, the requested entity, or the reason for failure.
#[allow(clippy::error_impl_error, reason = "crate-level error type, re-exported by name")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A header file was requested but holds no lines to pass through.
    #[error("file is empty: {}", path.display())]
    EmptyFile {
        /// Path to the empty file.
        path: PathBuf,
    },

    /// Every lookup strategy was exhausted without finding the entity.
    #[error(
        "Function '{entity}' not found in {}. The function name must exist in {}.",
        file.display(),
        file.display()
    )]
    EntityNotFound {
        /// Requested entity name, echoed verbatim.
        entity: String,
        /// File that was searched.
        file: PathBuf,
    },

    /// The requested source file does not exist on disk.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Source file exceeds the configured size limit.
    #[error("file too large ({size_bytes} bytes, max {max_bytes}): {}", file.display())]
    FileTooLarge {
        /// File that exceeded the size limit.
        file: PathBuf,
        /// Maximum allowed file size in bytes.
        max_bytes: u64,
        /// Actual file size in bytes.
        size_bytes: u64,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// The structural parser could not produce a usable tree.
    /// Recovered by the locator through the lexical fallback.
    #[error("parse failed: {}: {reason}", file.display())]
    ParseFailed {
        /// File that failed to parse.
        file: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// TOML deserialization of the config file failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// The file extension is neither a recognised source nor header extension.
    #[error("Only .c, .cpp and .h files are supported (got .{ext}): {}", path.display())]
    UnsupportedExtension {
        /// File extension without the leading dot.
        ext: String,
        /// Path whose extension was rejected.
        path: PathBuf,
    },
}

impl Error {
    /// Whether the locator may recover from this error by trying the next strategy.
    pub const fn is_recoverable(&self) -> bool {
        return matches!(self, Self::ParseFailed { .. } | Self::EntityNotFound { .. });
    }
}
