//! Core document types.

use serde::{Deserialize, Deserializer};

/// Presentation metadata from the leading `---` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Presentation title (empty when absent or null)
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    /// Presentation author (empty when absent or null)
    #[serde(deserialize_with = "null_as_empty")]
    pub author: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Metadata {
    /// Title to show in the status bar, or `None` when untitled.
    pub fn display_title(&self) -> Option<&str> {
        if self.title.is_empty() {
            None
        } else {
            Some(&self.title)
        }
    }
}

/// A single slide: the trimmed markdown between two delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    content: String,
}

impl Slide {
    pub(crate) const fn new(content: String) -> Self {
        Self { content }
    }

    /// Get the markdown source of the slide.
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A parsed presentation.
///
/// Always holds at least one slide; the parser refuses to build an empty one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    metadata: Metadata,
    slides: Vec<Slide>,
}

impl Document {
    pub(crate) fn from_parts(metadata: Metadata, slides: Vec<Slide>) -> Self {
        debug_assert!(!slides.is_empty(), "document must hold at least one slide");
        Self { metadata, slides }
    }

    /// Get the document metadata.
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Get all slides in presentation order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Get a slide by index.
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Number of slides (never zero).
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Index of the last slide.
    pub fn last_index(&self) -> usize {
        self.slides.len().saturating_sub(1)
    }
}
