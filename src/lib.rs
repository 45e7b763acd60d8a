// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::RenderError)
    clippy::module_name_repetitions
)]

//! # topdeck
//!
//! Markdown slide decks in the terminal.
//!
//! A deck is a markdown file split into slides by horizontal rules (`---`),
//! with an optional metadata block on top whose `title` and `author` become
//! a title slide. topdeck renders each slide with:
//! - Headings, emphasis, lists, block quotes and tables
//! - Syntax-highlighted code blocks
//! - Emoji shortcodes
//! - A status bar with the deck title and slide counter
//!
//! ## Architecture
//!
//! topdeck uses The Elm Architecture (TEA) pattern:
//! - **Model**: Presentation state and the rendered slide cache
//! - **Message**: Navigation, resize and quit events
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Deck parsing into slides
//! - [`render`]: Markdown rendering of a single slide
//! - [`highlight`]: Syntax highlighting
//! - [`ui`]: Terminal UI components
//! - [`config`]: Default flags from config files

pub mod app;
pub mod config;
pub mod document;
pub mod highlight;
pub mod perf;
pub mod render;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, update};
    pub use crate::document::Document;
    pub use crate::render::{MarkdownRenderer, RenderedSlide, SlideRenderer};
}
