//! Syntax highlighting for code blocks.
//!
//! Uses syntect for highlighting with Sublime Text syntax definitions.

use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::render::{InlineColor, InlineSpan, InlineStyle, RenderError};

/// Terminal background brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Dark,
    Light,
}

impl Background {
    /// Guess the background from the `COLORFGBG` environment variable.
    pub fn detect() -> Self {
        background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }

    pub const fn is_light(self) -> bool {
        matches!(self, Self::Light)
    }
}

/// Highlights fenced code with a fixed syntect theme.
#[derive(Debug, Clone)]
pub struct Highlighter {
    theme: Theme,
    background: Background,
}

impl Highlighter {
    /// Build a highlighter for the given background.
    ///
    /// With `theme_name` set, that syntect theme must exist; otherwise the
    /// first available preferred theme for the background is used.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ThemeNotFound`] when the named theme (or, with
    /// no name, any theme at all) is unavailable.
    pub fn new(background: Background, theme_name: Option<&str>) -> Result<Self, RenderError> {
        let themes = &theme_set().themes;
        let theme = match theme_name {
            Some(name) => themes
                .get(name)
                .cloned()
                .ok_or_else(|| RenderError::ThemeNotFound(name.to_string()))?,
            None => preferred_themes(background)
                .iter()
                .find_map(|name| themes.get(*name))
                .or_else(|| themes.values().next())
                .cloned()
                .ok_or_else(|| RenderError::ThemeNotFound("<default>".to_string()))?,
        };
        Ok(Self { theme, background })
    }

    pub const fn background(&self) -> Background {
        self.background
    }

    /// Highlight `code`, returning one span list per source line.
    ///
    /// Unknown or missing languages produce plain code spans.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Highlight`] if syntect fails on a line.
    pub fn highlight(
        &self,
        language: Option<&str>,
        code: &str,
    ) -> Result<Vec<Vec<InlineSpan>>, RenderError> {
        let syntax_set = syntax_set();
        let syntax = language
            .and_then(|lang| syntax_set.find_syntax_by_token(lang))
            .or_else(|| language.and_then(|lang| syntax_set.find_syntax_by_name(lang)));

        let Some(syntax) = syntax else {
            return Ok(code.lines().map(|line| vec![plain_code_span(line)]).collect());
        };

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let ranges = highlighter
                .highlight_line(line, syntax_set)
                .map_err(|err| RenderError::Highlight(err.to_string()))?;
            let mut spans = Vec::new();
            for (style, text) in ranges {
                let text = text.trim_end_matches(['\n', '\r']);
                if text.is_empty() {
                    continue;
                }
                let mut inline_style = InlineStyle::default();
                inline_style.code = true;
                let fg = InlineColor {
                    r: style.foreground.r,
                    g: style.foreground.g,
                    b: style.foreground.b,
                };
                inline_style.fg = Some(adjust_fg_for_background(fg, self.background));
                spans.push(InlineSpan::new(text.to_string(), inline_style));
            }
            lines.push(spans);
        }
        Ok(lines)
    }
}

fn plain_code_span(line: &str) -> InlineSpan {
    let mut style = InlineStyle::default();
    style.code = true;
    InlineSpan::new(line.to_string(), style)
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.syntax_set.load_defaults");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme_set() -> &'static ThemeSet {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    THEME_SET.get_or_init(|| {
        let _scope = crate::perf::scope("highlight.theme_set.load_defaults");
        ThemeSet::load_defaults()
    })
}

/// Names of the bundled syntect themes.
pub fn theme_names() -> Vec<&'static str> {
    theme_set().themes.keys().map(String::as_str).collect()
}

fn preferred_themes(background: Background) -> &'static [&'static str] {
    match background {
        Background::Dark => &[
            "Monokai Extended",
            "base16-eighties.dark",
            "Solarized (dark)",
            "base16-ocean.dark",
        ],
        Background::Light => &["InspiredGitHub", "Solarized (light)", "base16-ocean.light"],
    }
}

pub fn background_from_colorfgbg(colorfgbg: Option<&str>) -> Background {
    let Some(value) = colorfgbg else {
        return Background::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    let Ok(bg) = bg_str.parse::<u8>() else {
        return Background::Dark;
    };

    if bg >= 7 {
        Background::Light
    } else {
        Background::Dark
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn adjust_fg_for_background(color: InlineColor, background: Background) -> InlineColor {
    match background {
        Background::Dark => color,
        Background::Light => {
            let luma = 0.0722f32.mul_add(
                f32::from(color.b),
                0.2126f32.mul_add(f32::from(color.r), 0.7152 * f32::from(color.g)),
            );
            if luma < 155.0 {
                return color;
            }

            // Channels stay within 0..=255 after scaling by 0.42.
            InlineColor {
                r: (f32::from(color.r) * 0.42).round() as u8,
                g: (f32::from(color.g) * 0.42).round() as u8,
                b: (f32::from(color.b) * 0.42).round() as u8,
            }
        }
    }
}
