use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::Model;

/// Title shown for decks without a `title` in their metadata.
pub const UNTITLED: &str = "Presentation";

/// Compose the status bar text: title on the left, `current / total` on the right.
///
/// `current` is zero-based. The fill between the two never goes negative, so
/// a line wider than `width` keeps its full text and the terminal clips it.
pub fn status_line(title: Option<&str>, current: usize, total: usize, width: u16) -> String {
    let title = title.unwrap_or(UNTITLED);
    let counter = format!(" {} / {} ", current + 1, total);
    let used = title.width() + counter.width() + 1;
    let fill = usize::from(width).saturating_sub(used);
    format!(" {title}{}{counter}", " ".repeat(fill))
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let bar = Paragraph::new(model.status_line()).style(model.theme.status());
    frame.render_widget(bar, area);
}
