//! Presentation source parsing.
//!
//! This module handles:
//! - Detecting and decoding the leading `---` metadata block
//! - Splitting the body into slides on horizontal rules
//! - Synthesizing a title slide from metadata
//!
//! Parsing is a pure function of the input bytes; the resulting
//! [`Document`] is never mutated afterwards.

mod error;
mod front_matter;
mod parser;
mod types;

pub use error::ParseError;
pub use parser::parse;
pub use types::{Document, Metadata, Slide};

use std::path::Path;

use anyhow::{Context, Result};

/// Read a presentation file and parse it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
pub fn load(path: &Path) -> Result<Document> {
    let _scope = crate::perf::scope("document.load");
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&bytes).with_context(|| format!("Failed to parse {}", path.display()))
}
