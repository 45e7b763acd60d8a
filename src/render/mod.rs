//! Markdown rendering for slides.
//!
//! Rendering is a capability: anything implementing [`SlideRenderer`] turns
//! slide markdown into a [`RenderedSlide`] at a given width. The comrak-based
//! [`MarkdownRenderer`] is the real implementation; [`render_or_raw`] is the
//! adapter that degrades to raw markdown whenever rendering is unavailable
//! or fails.

mod markdown;
mod types;

pub use types::{InlineColor, InlineSpan, InlineStyle, LineType, RenderedLine, RenderedSlide};

use thiserror::Error;

use crate::highlight::{Background, Highlighter};

/// Errors raised while building a renderer or rendering a slide.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A requested syntax highlighting theme is not bundled.
    #[error("syntax theme not found: {0}")]
    ThemeNotFound(String),

    /// Syntax highlighting failed for a code block.
    #[error("highlight error: {0}")]
    Highlight(String),

    /// Rendering was asked for a zero-column layout.
    #[error("cannot render at zero width")]
    InvalidWidth,
}

/// Turns slide markdown into styled lines wrapped to a width.
pub trait SlideRenderer {
    /// Render `markdown` so that no line is wider than `width` columns.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] when the slide cannot be rendered; callers
    /// are expected to fall back to raw content.
    fn render(&self, markdown: &str, width: u16) -> Result<RenderedSlide, RenderError>;
}

/// Comrak-backed renderer with syntect highlighting for code blocks.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    highlighter: Highlighter,
}

impl MarkdownRenderer {
    /// Build a renderer for the given terminal background.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ThemeNotFound`] when `code_theme` names a theme
    /// that is not bundled.
    pub fn new(background: Background, code_theme: Option<&str>) -> Result<Self, RenderError> {
        Ok(Self {
            highlighter: Highlighter::new(background, code_theme)?,
        })
    }
}

impl SlideRenderer for MarkdownRenderer {
    fn render(&self, markdown: &str, width: u16) -> Result<RenderedSlide, RenderError> {
        if width == 0 {
            return Err(RenderError::InvalidWidth);
        }
        let lines = markdown::render_lines(markdown, usize::from(width), &self.highlighter)?;
        Ok(RenderedSlide::from_lines(lines))
    }
}

/// Render a slide, falling back to its raw markdown.
///
/// `renderer` is `None` when no renderer could be built; every slide is then
/// shown raw. A failed render only affects the slide being rendered.
pub fn render_or_raw(
    renderer: Option<&dyn SlideRenderer>,
    markdown: &str,
    width: u16,
) -> RenderedSlide {
    let Some(renderer) = renderer else {
        return RenderedSlide::raw(markdown);
    };
    match renderer.render(markdown, width) {
        Ok(slide) => RenderedSlide::from_lines(slide.lines().to_vec()),
        Err(err) => {
            tracing::debug!(%err, width, "slide render failed, showing raw markdown");
            RenderedSlide::raw(markdown)
        }
    }
}
