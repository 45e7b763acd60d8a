//! Presentation state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete presentation state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::Model;
pub use update::{Message, update};

use std::sync::Arc;

use crate::document::Document;
use crate::render::SlideRenderer;
use crate::ui::style::Theme;

/// Main application struct that owns the deck and runs the event loop.
pub struct App {
    document: Arc<Document>,
    theme: Theme,
    renderer: Option<Box<dyn SlideRenderer>>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("slides", &self.document.slide_count())
            .field("has_renderer", &self.renderer.is_some())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Create a new application presenting `document`.
    pub fn new(document: Document) -> Self {
        Self {
            document: Arc::new(document),
            theme: Theme::default(),
            renderer: None,
        }
    }

    /// Set the color theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the slide renderer; `None` shows every slide as raw markdown.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Option<Box<dyn SlideRenderer>>) -> Self {
        self.renderer = renderer;
        self
    }
}

#[cfg(test)]
mod tests;
