//! CLI command bodies: show, context, list.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config;
use crate::diagnostics;
use crate::error;
use crate::grammar::FileClass;
use crate::locator::Locator;
use crate::reader::SourceFile;
use crate::resolver;
use crate::types::{Definition, SourceLocation};

/// Load `.srcsnip.toml` from the working directory.
///
/// # Errors
///
/// Returns config read or parse errors.
fn load_locator() -> Result<Locator, error::Error> {
    let config = config::Config::load(&PathBuf::from("."))?;
    return Ok(Locator::new(config));
}

/// Classify and read `path` once, then locate `name` in it.
/// On a miss, the definitions the file does hold are returned alongside the error.
fn locate_with_candidates(
    locator: &Locator,
    path: &Path,
    name: &str,
) -> Result<SourceLocation, (error::Error, Vec<Definition>)> {
    let class = FileClass::for_path(path).map_err(|e| return (e, Vec::new()))?;
    let source = locator.read(path).map_err(|e| return (e, Vec::new()))?;

    return locator.locate_in(&source, class, name).map_err(|e| {
        let candidates = match e {
            error::Error::EntityNotFound { .. } => candidate_definitions(&source, class),
            _ => Vec::new(),
        };
        return (e, candidates);
    });
}

/// Print the snippet for `name` in `file` to stdout, or the full result as JSON.
/// Errors are rendered as markdown diagnostics on stderr.
pub fn show(file: &str, name: &str, json: bool) -> ExitCode {
    let locator = match load_locator() {
        Err(e) => {
            diagnostics::print_error(&e, &[]);
            return ExitCode::FAILURE;
        },
        Ok(l) => l,
    };

    match locate_with_candidates(&locator, Path::new(file), name) {
        Err((e, candidates)) => {
            diagnostics::print_error(&e, &candidates);
            return ExitCode::FAILURE;
        },
        Ok(location) if json => match serde_json::to_string_pretty(&location) {
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            },
            Ok(rendered) => println!("{rendered}"),
        },
        Ok(location) => println!("{}", location.numbered_source),
    }

    return ExitCode::SUCCESS;
}

/// Print the snippet or the error message as plain text. Always succeeds, so
/// text-driven callers can embed whatever comes back.
pub fn context(file: &str, name: &str) -> ExitCode {
    let text = match load_locator() {
        Err(e) => e.to_string(),
        Ok(locator) => locator.locate_text(Path::new(file), name),
    };
    println!("{text}");
    return ExitCode::SUCCESS;
}

/// List every definition the structural resolver sees in `file`.
///
/// # Errors
///
/// Returns errors from config loading, extension checks, reading, or parsing.
pub fn list(file: &str) -> Result<(), error::Error> {
    let locator = load_locator()?;
    let path = Path::new(file);
    let class = FileClass::for_path(path)?;
    let source = locator.read(path)?;

    for def in resolver::list_definitions(&source, class.listing_dialect())? {
        println!(
            "{file}:{}-{}  {:<8}  {}",
            def.extent.start,
            def.extent.end,
            def.kind.label(),
            def.name
        );
    }

    return Ok(());
}

/// Definitions in an already-read file for the not-found diagnostic.
/// Empty if it cannot be parsed.
fn candidate_definitions(source: &SourceFile, class: FileClass) -> Vec<Definition> {
    return resolver::list_definitions(source, class.listing_dialect()).unwrap_or_default();
}
