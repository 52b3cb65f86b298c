//! Text-only entity location used when the structural parse is unusable.
//!
//! Braces inside string literals and comments are counted like any other
//! brace; extents found here are approximate.

use std::path::Path;

use crate::error::Error;
use crate::types::Extent;

/// Find a declaration-shaped line mentioning `name` and bound its body by brace depth.
///
/// Always terminates: when the body never closes, the extent runs to the last line.
///
/// # Errors
///
/// Returns `Error::EntityNotFound` if no line looks like a declaration of `name`.
pub fn scan(file: &Path, lines: &[String], name: &str) -> Result<Extent, Error> {
    let Some(start_idx) = lines.iter().position(|line| return is_declaration_line(line, name)) else {
        return Err(Error::EntityNotFound {
            entity: name.to_string(),
            file: file.to_path_buf(),
        });
    };

    let end_idx = body_end_index(lines, start_idx).unwrap_or(lines.len().saturating_sub(1));

    return Ok(Extent::new(start_idx.saturating_add(1), end_idx.saturating_add(1)));
}

/// A line mentions `name`, has a `(` after it, and is not comment text.
fn is_declaration_line(line: &str, name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let Some((_, after)) = line.split_once(name) else {
        return false;
    };
    if !after.contains('(') {
        return false;
    }

    let trimmed = line.trim();
    return !(trimmed.starts_with("//") || trimmed.starts_with('*') || trimmed.starts_with("/*"));
}

/// Brace-depth state of the body scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyScan {
    /// Inside the body at this depth (always at least 1).
    Open(u32),
    /// No `{` seen yet.
    SeekingOpen,
}

impl BodyScan {
    /// Advance by one character. Returns `None` once the body has closed.
    fn step(self, ch: char) -> Option<Self> {
        return match (self, ch) {
            (Self::SeekingOpen, '{') => Some(Self::Open(1)),
            (Self::SeekingOpen, _) => Some(Self::SeekingOpen),
            (Self::Open(depth), '{') => Some(Self::Open(depth.saturating_add(1))),
            (Self::Open(1), '}') => None,
            (Self::Open(depth), '}') => Some(Self::Open(depth.saturating_sub(1))),
            (Self::Open(depth), _) => Some(Self::Open(depth)),
        };
    }
}

/// Zero-based index of the line where the body opened at or after `start_idx`
/// returns to depth zero. `None` if it never does.
fn body_end_index(lines: &[String], start_idx: usize) -> Option<usize> {
    let mut state = BodyScan::SeekingOpen;
    for (idx, line) in lines.iter().enumerate().skip(start_idx) {
        for ch in line.chars() {
            match state.step(ch) {
                None => return Some(idx),
                Some(next) => state = next,
            }
        }
    }
    return None;
}
