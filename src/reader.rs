//! Whole-file reads split into lines. Nothing here keeps a handle open.

use std::path::{Path, PathBuf};

use crate::error::Error;

/// A source file read fully into memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Lines with their terminators removed, otherwise untouched.
    lines: Vec<String>,
    /// Path the file was read from.
    path: PathBuf,
    /// Decoded text. Invalid UTF-8 sequences are replaced.
    text: String,
    /// Whether the raw bytes were valid UTF-8.
    valid_utf8: bool,
}

impl SourceFile {
    /// Build a source file from in-memory text.
    pub fn from_text(path: &Path, text: &str) -> Self {
        return Self {
            lines: text.lines().map(String::from).collect(),
            path: path.to_path_buf(),
            text: text.to_string(),
            valid_utf8: true,
        };
    }

    /// Read a file in one pass. Files over `max_bytes` are rejected before reading.
    ///
    /// # Errors
    ///
    /// Returns `Error::FileNotFound` if the path does not exist,
    /// `Error::FileTooLarge` if it exceeds `max_bytes`,
    /// or `Error::Io` for any other read failure.
    pub fn read(path: &Path, max_bytes: u64) -> Result<Self, Error> {
        let metadata = match std::fs::metadata(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::FileNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(m) => m,
        };
        if metadata.len() > max_bytes {
            return Err(Error::FileTooLarge {
                file: path.to_path_buf(),
                max_bytes,
                size_bytes: metadata.len(),
            });
        }

        let bytes = match std::fs::read(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::FileNotFound { path: path.to_path_buf() });
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(b) => b,
        };

        return Ok(match String::from_utf8(bytes) {
            Ok(text) => Self::from_text(path, &text),
            Err(e) => {
                let text = String::from_utf8_lossy(e.as_bytes()).into_owned();
                Self {
                    valid_utf8: false,
                    ..Self::from_text(path, &text)
                }
            },
        });
    }

    /// Lines of the file; index 0 is line 1.
    pub fn lines(&self) -> &[String] {
        return &self.lines;
    }

    /// Number of lines in the file.
    pub fn line_count(&self) -> usize {
        return self.lines.len();
    }

    /// Path the file was read from.
    pub fn path(&self) -> &Path {
        return &self.path;
    }

    /// Full decoded text.
    pub fn text(&self) -> &str {
        return &self.text;
    }

    /// Whether the bytes on disk were valid UTF-8.
    pub const fn is_valid_utf8(&self) -> bool {
        return self.valid_utf8;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let err = SourceFile::read(Path::new("does/not/exist.c"), 1024).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn strips_crlf_terminators() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.c");
        std::fs::write(&path, "int a;\r\nint b;\r\n").unwrap();

        let file = SourceFile::read(&path, 1024).unwrap();
        assert_eq!(file.lines(), ["int a;", "int b;"]);
        assert!(file.is_valid_utf8());
    }

    #[test]
    fn oversized_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.c");
        std::fs::write(&path, "int x;\n".repeat(10)).unwrap();

        let err = SourceFile::read(&path, 8).unwrap_err();
        assert!(matches!(err, Error::FileTooLarge { max_bytes: 8, .. }));
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.c");
        std::fs::write(&path, b"/* caf\xe9 */\nint x;\n").unwrap();

        let file = SourceFile::read(&path, 1024).unwrap();
        assert!(!file.is_valid_utf8());
        assert_eq!(file.line_count(), 2);
        assert_eq!(file.lines().get(1).map(String::as_str), Some("int x;"));
    }
}
