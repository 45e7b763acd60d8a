use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;
use crate::render::{RenderedLine, RenderedSlide};

use super::style::{Theme, style_for_inline, style_for_line_type};
use super::{LOADING_TEXT, SLIDE_PADDING_X, SLIDE_PADDING_Y, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();

    if !model.is_ready() {
        frame.render_widget(Paragraph::new(LOADING_TEXT), area);
        return;
    }

    // Reserve the last row for the status bar.
    let body_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };

    render_slide(model, frame, body_area);
    status::render_status_bar(model, frame, status_area);
}

fn render_slide(model: &Model, frame: &mut Frame, area: Rect) {
    let content: Vec<Line> = model
        .rendered_slide()
        .map(|slide| slide_lines(&model.theme, slide))
        .unwrap_or_default();

    let slide_block = Block::default().borders(Borders::NONE).padding(Padding::new(
        SLIDE_PADDING_X,
        SLIDE_PADDING_X,
        SLIDE_PADDING_Y,
        SLIDE_PADDING_Y,
    ));
    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(content).block(slide_block), area);
}

fn slide_lines(theme: &Theme, slide: &RenderedSlide) -> Vec<Line<'static>> {
    slide
        .lines()
        .iter()
        .map(|line| styled_line(theme, line))
        .collect()
}

fn styled_line(theme: &Theme, line: &RenderedLine) -> Line<'static> {
    let line_style = style_for_line_type(theme, line.line_type());
    match line.spans() {
        Some(spans) => Line::from(
            spans
                .iter()
                .map(|span| {
                    Span::styled(
                        span.text().to_string(),
                        style_for_inline(theme, line_style, span.style()),
                    )
                })
                .collect::<Vec<_>>(),
        ),
        None => Line::styled(line.content().to_string(), line_style),
    }
}
