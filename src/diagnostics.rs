use std::fmt::Write as _;
use std::path::Path;

use crate::error::Error;
use crate::types::Definition;

/// Bold escape for headings on a terminal.
const BOLD: &str = "\x1b[1m";
/// Reset escape.
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
/// `candidates` lists definitions that do exist in the file, if known.
pub fn print_error(e: &Error, candidates: &[Definition]) {
    let md = render_error(e, candidates);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic: what happened and
/// how to fix it. Readable by both humans and LLM agents.
pub fn render_error(e: &Error, candidates: &[Definition]) -> String {
    return match e {
        Error::EntityNotFound { entity, file } => render_entity_not_found(file, entity, candidates),
        Error::FileTooLarge { file, size_bytes, max_bytes } => {
            render_file_too_large(file, *size_bytes, *max_bytes)
        },
        Error::UnsupportedExtension { ext, path } => render_unsupported_extension(path, ext),
        _ => render_generic(e),
    };
}

/// Headline-plus-message rendering for errors without a dedicated fix section.
fn render_generic(e: &Error) -> String {
    return match e {
        Error::EmptyFile { path } => format!("\
# Error: Empty File

`{}` has no lines to show.
", path.display()),

        Error::FileNotFound { path } => format!("\
# Error: File Not Found

`{}` does not exist.
", path.display()),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::ParseFailed { file, reason } => format!("\
# Error: Parse Failed

Could not parse `{}`: {reason}
", file.display()),

        Error::TomlDe(e) => format!("\
# Error: Invalid Config

{e}

## Fix

Correct or remove `.srcsnip.toml`.
"),

        // Already handled in render_error, but need exhaustive match.
        _ => format!("\
# Error

{e}
"),
    };
}

/// Entity-not-found diagnostic, listing what the file does define.
fn render_entity_not_found(file: &Path, entity: &str, candidates: &[Definition]) -> String {
    let mut out = format!("\
# Error: Entity Not Found

No function, method, class, or struct named `{entity}` in `{}`.
", file.display());

    if let Some(close) = find_closest_candidate(entity, candidates) {
        let _ = write!(out, "\n## Did you mean `{}`?\n\n", close.name);
        let _ = writeln!(out, "    srcsnip show {} {}", file.display(), close.name);
    } else if !candidates.is_empty() {
        out.push_str("\n## Available definitions\n\n");
        for c in candidates {
            let _ = writeln!(out, "- `{}` ({}, lines {}-{})", c.name, c.kind.label(), c.extent.start, c.extent.end);
        }
    }

    return out;
}

/// Find a candidate whose name differs from `entity` only in case.
fn find_closest_candidate<'a>(entity: &str, candidates: &'a [Definition]) -> Option<&'a Definition> {
    return candidates.iter().find(|c| return c.name.eq_ignore_ascii_case(entity));
}

/// File-too-large diagnostic.
fn render_file_too_large(file: &Path, size_bytes: u64, max_bytes: u64) -> String {
    return format!("\
# Error: File Too Large

`{}` is {size_bytes} bytes (max {max_bytes}).

## Fix

Raise `max_file_bytes` in `.srcsnip.toml`.
", file.display());
}

/// Unsupported-extension diagnostic.
fn render_unsupported_extension(path: &Path, ext: &str) -> String {
    return format!(
        "\
# Error: Unsupported Extension

`{}` has extension `.{ext}`.

## Supported extensions

- `.c`: C source, searched
- `.cpp`: C++ source, searched
- `.h`: header, shown whole
",
        path.display()
    );
}
