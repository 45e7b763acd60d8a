use super::*;
use crate::app::{Message, Model, update};
use crate::document::Document;
use crate::highlight::Background;
use crate::render::MarkdownRenderer;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Modifier;

fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).unwrap()
}

fn rendered_model(source: &str, width: u16, height: u16) -> Model {
    let doc = Document::parse(source.as_bytes()).unwrap();
    let renderer = MarkdownRenderer::new(Background::Dark, None).unwrap();
    let model = Model::new(doc).with_renderer(Some(Box::new(renderer)));
    update(model, Message::Resize(width, height))
}

fn draw(model: &Model, width: u16, height: u16) -> Buffer {
    let mut terminal = create_test_terminal(width, height);
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn buffer_text(buffer: &Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}

#[test]
fn test_slide_content_width_reserves_margins() {
    assert_eq!(slide_content_width(80), 72);
    assert_eq!(slide_content_width(28), 20);
}

#[test]
fn test_slide_content_width_has_floor() {
    assert_eq!(slide_content_width(27), MIN_CONTENT_WIDTH);
    assert_eq!(slide_content_width(0), MIN_CONTENT_WIDTH);
}

#[test]
fn test_render_shows_rendered_heading_with_style() {
    let model = rendered_model("# Hello", 40, 10);
    let buffer = draw(&model, 40, 10);

    let cell = &buffer[(SLIDE_PADDING_X + 2, SLIDE_PADDING_Y)];
    assert_eq!(cell.symbol(), "H");
    assert!(cell.modifier.contains(Modifier::BOLD));
}

#[test]
fn test_render_shows_image_placeholder() {
    let model = rendered_model("![My Image](missing.png)", 60, 10);
    let buffer = draw(&model, 60, 10);
    assert!(buffer_text(&buffer).contains("[Image: My Image]"));
}

#[test]
fn test_status_bar_uses_theme_colors() {
    let model = rendered_model("---\ntitle: Talk\n---\n\n# A\n", 40, 10);
    let buffer = draw(&model, 40, 10);

    let cell = &buffer[(0, 9)];
    assert_eq!(cell.bg, model.theme.status_bg);
    assert_eq!(cell.fg, model.theme.status_fg);
}

#[test]
fn test_status_bar_follows_model_theme() {
    let doc = Document::parse(b"# A\n").unwrap();
    let model = Model::new(doc).with_theme(style::Theme::light());
    let model = update(model, Message::Resize(40, 10));
    let buffer = draw(&model, 40, 10);

    assert_eq!(buffer[(0, 9)].bg, style::Theme::light().status_bg);
}

#[test]
fn test_long_paragraph_stays_inside_padding() {
    let text = "word ".repeat(40);
    let model = rendered_model(&text, 40, 20);
    let buffer = draw(&model, 40, 20);

    for y in 0..19 {
        for x in (40 - SLIDE_PADDING_X)..40 {
            assert_eq!(buffer[(x, y)].symbol(), " ", "cell ({x}, {y}) is in the margin");
        }
    }
}
