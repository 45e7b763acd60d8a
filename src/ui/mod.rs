//! Terminal UI components.
//!
//! This module contains the view half of the presentation:
//! - [`style`]: Theming and colors
//! - [`render`]: Slide body and status bar composition

pub mod style;

mod render;
mod status;

pub use render::render;
pub use status::status_line;

/// Columns of padding on each side of the slide body.
pub const SLIDE_PADDING_X: u16 = 4;
/// Rows of padding above and below the slide body.
pub const SLIDE_PADDING_Y: u16 = 2;
/// Narrowest width slides are ever rendered at.
pub const MIN_CONTENT_WIDTH: u16 = 20;

/// Shown until the first resize tells us how wide to render.
pub const LOADING_TEXT: &str = "Loading...";

/// Width slides are rendered at for a terminal `total_width` columns wide.
pub const fn slide_content_width(total_width: u16) -> u16 {
    let width = total_width.saturating_sub(2 * SLIDE_PADDING_X);
    if width < MIN_CONTENT_WIDTH {
        MIN_CONTENT_WIDTH
    } else {
        width
    }
}

#[cfg(test)]
mod tests;
