use std::path::Path;

use crate::error::Error;

/// Maximum source file size read by default (16 MiB).
const DEFAULT_MAX_FILE_BYTES: u64 = 16 * 1024 * 1024;

/// Locator configuration loaded from `.srcsnip.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether the lexical scanner runs when the structural parse fails.
    pub lexical_fallback: bool,
    /// Files larger than this are rejected before being read.
    pub max_file_bytes: u64,
}

/// Raw TOML structure for `.srcsnip.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SrcsnipTomlConfig {
    /// Overrides `Config::lexical_fallback`.
    lexical_fallback: Option<bool>,
    /// Overrides `Config::max_file_bytes`.
    max_file_bytes: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        return Self {
            lexical_fallback: true,
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        };
    }
}

impl Config {
    /// Load config from `.srcsnip.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist. A file that exists but
    /// is malformed is an error, never a silent fallback to defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::TomlDe` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(".srcsnip.toml");
        let content = match std::fs::read_to_string(&path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        return Self::parse(&content);
    }

    /// Parse config TOML, filling unset keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed or has unknown keys.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: SrcsnipTomlConfig = toml::from_str(content)?;
        let defaults = Self::default();
        return Ok(Self {
            lexical_fallback: raw.lexical_fallback.unwrap_or(defaults.lexical_fallback),
            max_file_bytes: raw.max_file_bytes.unwrap_or(defaults.max_file_bytes),
        });
    }
}
