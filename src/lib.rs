//! Extract the source of a named C or C++ function, method, class, or struct
//! as a numbered snippet.
//!
//! A structural tree-sitter lookup runs first; when the file cannot be parsed
//! usefully, a lexical brace-counting scan takes over. Headers are returned whole.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let locator = srcsnip::Locator::default();
//! let text = locator.locate_text(Path::new("src/http.c"), "parse_header");
//! println!("{text}");
//! ```

pub mod commands;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod grammar;
pub mod locator;
pub mod reader;
pub mod resolver;
pub mod types;

pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::locator::Locator;
pub use crate::types::{EntityKind, Extent, SourceLocation};
