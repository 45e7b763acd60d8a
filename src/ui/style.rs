//! Theming and color definitions.
//!
//! Slide elements are styled from a [`Theme`] chosen once at startup for the
//! terminal background. Uses ANSI colors that adapt to the terminal's palette.

use ratatui::style::{Color, Modifier, Style};

use crate::highlight::Background;
use crate::render::{InlineColor, InlineStyle, LineType};

/// Theme configuration for slides and the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Heading level 1 style
    pub h1: Style,
    /// Heading level 2 style
    pub h2: Style,
    /// Heading level 3 style
    pub h3: Style,
    /// Heading level 4+ style
    pub h4: Style,
    /// Code block frame and plain code style
    pub code: Style,
    /// Inline code style
    pub inline_code: Style,
    /// Block quote style
    pub quote: Style,
    /// Link style
    pub link: Style,
    /// Table style
    pub table: Style,
    /// Image placeholder style
    pub image: Style,
    /// Horizontal rule style
    pub hr: Style,
    /// Status bar background
    pub status_bg: Color,
    /// Status bar foreground
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a theme optimized for dark terminals.
    pub fn dark() -> Self {
        Self {
            h1: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            h4: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            code: Style::default()
                .fg(Color::Indexed(245))
                .add_modifier(Modifier::DIM),
            inline_code: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            table: Style::default(),
            image: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::ITALIC),
            hr: Style::default()
                .fg(Color::Indexed(240))
                .add_modifier(Modifier::DIM),
            status_bg: Color::Indexed(236),
            status_fg: Color::Indexed(252),
        }
    }

    /// Create a theme optimized for light terminals.
    pub fn light() -> Self {
        Self {
            h1: Style::default()
                .fg(Color::Indexed(24))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            h2: Style::default()
                .fg(Color::Indexed(22))
                .add_modifier(Modifier::BOLD),
            h3: Style::default()
                .fg(Color::Indexed(58))
                .add_modifier(Modifier::BOLD),
            h4: Style::default()
                .fg(Color::Indexed(25))
                .add_modifier(Modifier::BOLD),
            code: Style::default().fg(Color::Indexed(238)),
            inline_code: Style::default()
                .fg(Color::Indexed(88))
                .add_modifier(Modifier::BOLD),
            quote: Style::default()
                .fg(Color::Indexed(24))
                .add_modifier(Modifier::ITALIC),
            link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            table: Style::default(),
            image: Style::default()
                .fg(Color::Indexed(90))
                .add_modifier(Modifier::ITALIC),
            hr: Style::default().fg(Color::Indexed(241)),
            status_bg: Color::Indexed(252),
            status_fg: Color::Indexed(235),
        }
    }

    pub fn for_background(background: Background) -> Self {
        match background {
            Background::Dark => Self::dark(),
            Background::Light => Self::light(),
        }
    }

    /// Style of the bottom status bar.
    pub fn status(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }
}

/// Get the style for a given line type.
pub fn style_for_line_type(theme: &Theme, line_type: &LineType) -> Style {
    match line_type {
        LineType::Heading(1) => theme.h1,
        LineType::Heading(2) => theme.h2,
        LineType::Heading(3) => theme.h3,
        LineType::Heading(_) => theme.h4,
        LineType::CodeBlock => theme.code,
        LineType::BlockQuote => theme.quote,
        LineType::HorizontalRule => theme.hr,
        LineType::Image => theme.image,
        LineType::Table => theme.table,
        LineType::ListItem(_) | LineType::Paragraph | LineType::Empty => Style::default(),
    }
}

/// Get the style for an inline span, merged with a base line style.
pub fn style_for_inline(theme: &Theme, base: Style, inline: InlineStyle) -> Style {
    let mut style = base;

    if let Some(fg) = inline.fg {
        style = style
            .fg(fg_color_for_terminal(fg))
            .remove_modifier(Modifier::DIM);
    }
    if let Some(bg) = inline.bg {
        style = style.bg(Color::Rgb(bg.r, bg.g, bg.b));
    }

    if inline.emphasis {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if inline.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if inline.strikethrough {
        style = style.add_modifier(Modifier::CROSSED_OUT);
    }
    if inline.link && inline.fg.is_none() {
        style = style.patch(theme.link);
    }
    // Code block lines carry their own frame style; only inline code is recolored.
    if inline.code && inline.fg.is_none() && base != theme.code {
        style = style.patch(theme.inline_code);
    }

    style
}

fn fg_color_for_terminal(fg: InlineColor) -> Color {
    if supports_truecolor() {
        Color::Rgb(fg.r, fg.g, fg.b)
    } else {
        Color::Indexed(rgb_to_xterm_256(fg.r, fg.g, fg.b))
    }
}

fn supports_truecolor() -> bool {
    if let Ok(force) = std::env::var("TOPDECK_TRUECOLOR") {
        let value = force.to_ascii_lowercase();
        return matches!(value.as_str(), "1" | "true" | "yes" | "on");
    }
    supports_truecolor_from_env(
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    let has = |value: Option<&str>, needles: &[&str]| {
        value.is_some_and(|v| {
            let lower = v.to_ascii_lowercase();
            needles.iter().any(|needle| lower.contains(needle))
        })
    };
    has(colorterm, &["truecolor", "24bit"]) || has(term, &["direct", "truecolor"])
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // Result is always 0-5, fits in u8
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    16 + (36 * to_cube(r)) + (6 * to_cube(g)) + to_cube(b)
}
