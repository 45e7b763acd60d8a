use std::sync::Arc;

use crate::document::Document;
use crate::render::{RenderedSlide, SlideRenderer, render_or_raw};
use crate::ui::style::Theme;

/// The complete presentation state.
///
/// `current` always indexes a slide of `document`. The render cache holds one
/// entry per slide and is valid only for `cache_width`; it is rebuilt when a
/// resize changes the width, never on navigation.
pub struct Model {
    /// Terminal width in columns (0 until the first resize)
    pub width: u16,
    /// Terminal height in rows (0 until the first resize)
    pub height: u16,
    /// Styles for slides and the status bar
    pub theme: Theme,
    /// Whether the app should quit
    pub should_quit: bool,
    document: Arc<Document>,
    current: usize,
    rendered: Vec<RenderedSlide>,
    cache_width: Option<u16>,
    renderer: Option<Box<dyn SlideRenderer>>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("current", &self.current)
            .field("slides", &self.document.slide_count())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("cache_width", &self.cache_width)
            .field("has_renderer", &self.renderer.is_some())
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model showing the first slide, waiting for a terminal size.
    ///
    /// Without [`with_renderer`](Self::with_renderer) every slide is shown as
    /// raw markdown.
    pub fn new(document: impl Into<Arc<Document>>) -> Self {
        Self {
            document: document.into(),
            current: 0,
            width: 0,
            height: 0,
            theme: Theme::default(),
            should_quit: false,
            rendered: Vec::new(),
            cache_width: None,
            renderer: None,
        }
    }

    /// Use `theme` for slides and the status bar.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Use `renderer` for slides; `None` means rendering is unavailable.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Option<Box<dyn SlideRenderer>>) -> Self {
        self.renderer = renderer;
        // Anything cached was produced by the previous renderer.
        self.rendered.clear();
        self.cache_width = None;
        self
    }

    /// The deck being presented.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Index of the slide on screen.
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of slides in the deck, including a generated title slide.
    pub fn slide_count(&self) -> usize {
        self.document.slide_count()
    }

    /// True once a resize has given the model a width to render at.
    pub const fn is_ready(&self) -> bool {
        self.cache_width.is_some()
    }

    /// Terminal width the render cache was built for.
    pub const fn cache_width(&self) -> Option<u16> {
        self.cache_width
    }

    /// The cached rendering of the current slide, if any.
    pub fn rendered_slide(&self) -> Option<&RenderedSlide> {
        self.rendered.get(self.current)
    }

    /// Status bar text for the current position and terminal width.
    pub fn status_line(&self) -> String {
        crate::ui::status_line(
            self.document.metadata().display_title(),
            self.current,
            self.slide_count(),
            self.width,
        )
    }

    /// Jump to any index, bypassing the bounds kept by navigation.
    #[cfg(test)]
    pub(crate) const fn set_current(&mut self, index: usize) {
        self.current = index;
    }

    pub(super) fn next_slide(&mut self) {
        self.current = (self.current + 1).min(self.document.last_index());
    }

    pub(super) const fn prev_slide(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub(super) const fn first_slide(&mut self) {
        self.current = 0;
    }

    pub(super) fn last_slide(&mut self) {
        self.current = self.document.last_index();
    }

    pub(super) fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        if self.cache_width != Some(width) {
            self.rebuild_cache(width);
        }
    }

    fn rebuild_cache(&mut self, width: u16) {
        let scope = crate::perf::scope("model.rebuild_cache");
        let content_width = crate::ui::slide_content_width(width);
        let renderer = self.renderer.as_deref();
        self.rendered = self
            .document
            .slides()
            .iter()
            .map(|slide| render_or_raw(renderer, slide.content(), content_width))
            .collect();
        self.cache_width = Some(width);
        tracing::debug!(
            width,
            content_width,
            slides = self.rendered.len(),
            elapsed_ms = scope.elapsed_ms(),
            "rebuilt slide cache"
        );
    }
}
