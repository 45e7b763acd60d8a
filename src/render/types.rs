//! Styled output types produced by slide rendering.

/// A rendered slide: styled lines ready for display.
///
/// Trailing blank lines are never kept, so the line count is the height the
/// slide actually needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedSlide {
    lines: Vec<RenderedLine>,
}

impl RenderedSlide {
    /// Build a slide from rendered lines, dropping trailing blank lines.
    pub fn from_lines(mut lines: Vec<RenderedLine>) -> Self {
        while lines.last().is_some_and(RenderedLine::is_blank) {
            lines.pop();
        }
        Self { lines }
    }

    #[cfg(test)]
    pub(crate) const fn untrimmed(lines: Vec<RenderedLine>) -> Self {
        Self { lines }
    }

    /// Show markdown source verbatim, one plain line per source line.
    pub fn raw(source: &str) -> Self {
        Self::from_lines(
            source
                .trim_end_matches(['\n', '\r'])
                .lines()
                .map(|line| RenderedLine::new(line.to_string(), LineType::Paragraph))
                .collect(),
        )
    }

    /// Get the rendered lines.
    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Plain text of the slide with styling dropped.
    pub fn to_plain_string(&self) -> String {
        self.lines
            .iter()
            .map(RenderedLine::content)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single rendered line with styling information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// The text content of the line
    content: String,
    /// The type of line (for styling)
    line_type: LineType,
    /// Optional inline-styled spans for rendering
    spans: Vec<InlineSpan>,
}

impl RenderedLine {
    /// Create a new rendered line.
    pub const fn new(content: String, line_type: LineType) -> Self {
        Self {
            content,
            line_type,
            spans: Vec::new(),
        }
    }

    /// Create a new rendered line with inline spans.
    pub const fn with_spans(content: String, line_type: LineType, spans: Vec<InlineSpan>) -> Self {
        Self {
            content,
            line_type,
            spans,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(String::new(), LineType::Empty)
    }

    /// Get the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the line type.
    pub const fn line_type(&self) -> &LineType {
        &self.line_type
    }

    /// Get inline spans, if present.
    pub fn spans(&self) -> Option<&[InlineSpan]> {
        if self.spans.is_empty() {
            None
        } else {
            Some(&self.spans)
        }
    }

    fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Inline style flags for a text span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
    pub fg: Option<InlineColor>,
    pub bg: Option<InlineColor>,
}

/// RGB color for inline styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A styled inline span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    text: String,
    style: InlineStyle,
}

impl InlineSpan {
    pub const fn new(text: String, style: InlineStyle) -> Self {
        Self { text, style }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn style(&self) -> InlineStyle {
        self.style
    }
}

/// Type of a rendered line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Normal paragraph text
    Paragraph,
    /// Heading with level (1-6)
    Heading(u8),
    /// Code block line
    CodeBlock,
    /// Block quote line
    BlockQuote,
    /// List item with nesting level
    ListItem(usize),
    /// Table row
    Table,
    /// Horizontal rule
    HorizontalRule,
    /// Image placeholder
    Image,
    /// Empty line
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lines_drops_trailing_blank_lines() {
        let slide = RenderedSlide::from_lines(vec![
            RenderedLine::new("a".into(), LineType::Paragraph),
            RenderedLine::empty(),
            RenderedLine::new("  ".into(), LineType::Paragraph),
        ]);
        assert_eq!(slide.line_count(), 1);
    }

    #[test]
    fn test_from_lines_keeps_inner_blank_lines() {
        let slide = RenderedSlide::from_lines(vec![
            RenderedLine::new("a".into(), LineType::Paragraph),
            RenderedLine::empty(),
            RenderedLine::new("b".into(), LineType::Paragraph),
        ]);
        assert_eq!(slide.to_plain_string(), "a\n\nb");
    }

    #[test]
    fn test_raw_preserves_source_lines() {
        let slide = RenderedSlide::raw("# Title\n\n*author*\n\n");
        assert_eq!(slide.to_plain_string(), "# Title\n\n*author*");
        assert!(
            slide
                .lines()
                .iter()
                .all(|line| line.spans().is_none())
        );
    }

    #[test]
    fn test_raw_of_empty_source_is_empty() {
        assert!(RenderedSlide::raw("").is_empty());
    }
}
