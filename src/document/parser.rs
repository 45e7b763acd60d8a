//! Splitting presentation source into slides.

use std::sync::LazyLock;

use regex::Regex;

use super::error::ParseError;
use super::front_matter;
use super::types::{Document, Metadata, Slide};

/// A horizontal rule on its own line: three or more hyphens, then only
/// trailing whitespace.
static SLIDE_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^-{3,}[ \t\r]*$").expect("slide delimiter regex"));

impl Document {
    /// Parse presentation source into a Document.
    ///
    /// # Example
    ///
    /// ```
    /// use topdeck::document::Document;
    ///
    /// let doc = Document::parse(b"# One\n\n---\n\n# Two\n").unwrap();
    /// assert_eq!(doc.slide_count(), 2);
    /// ```
    ///
    /// # Errors
    ///
    /// See [`parse`].
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        parse(bytes)
    }
}

/// Parse presentation source into a Document.
///
/// # Errors
///
/// Returns [`ParseError::InvalidMetadata`] when the metadata block cannot be
/// decoded and [`ParseError::EmptyDocument`] when no slide remains.
pub fn parse(bytes: &[u8]) -> Result<Document, ParseError> {
    let text = String::from_utf8_lossy(bytes);
    let source = text.strip_prefix('\u{feff}').unwrap_or(&*text);

    let (metadata, body) = match front_matter::split(source) {
        Some((payload, body)) => (front_matter::decode(payload)?, body),
        None => (Metadata::default(), source),
    };

    let mut slides = split_slides(body);
    if !metadata.title.is_empty() {
        slides.insert(0, title_slide(&metadata));
    }

    if slides.is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    tracing::debug!(
        slides = slides.len(),
        titled = !metadata.title.is_empty(),
        "parsed presentation"
    );
    Ok(Document::from_parts(metadata, slides))
}

/// Split a body on horizontal rules, dropping blank segments.
fn split_slides(body: &str) -> Vec<Slide> {
    SLIDE_DELIMITER
        .split(body)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| Slide::new(segment.to_string()))
        .collect()
}

fn title_slide(metadata: &Metadata) -> Slide {
    let mut content = format!("# {}", metadata.title);
    if !metadata.author.is_empty() {
        content.push_str("\n\n*");
        content.push_str(&metadata.author);
        content.push('*');
    }
    Slide::new(content)
}
