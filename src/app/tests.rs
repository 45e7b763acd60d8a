use std::cell::RefCell;
use std::rc::Rc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use proptest::prelude::*;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

use crate::document::Document;
use crate::render::{RenderError, RenderedSlide, SlideRenderer};

use super::event_loop::ResizeDebouncer;
use super::{App, Message, Model, update};

const DECK: &[u8] = b"---\ntitle: Quarterly Review\nauthor: Sam\n---\n\n# One\n\n---\n\n# Two\n\n---\n\n# Three\n";

fn create_test_document() -> Document {
    Document::parse(DECK).unwrap()
}

fn create_test_model() -> Model {
    Model::new(create_test_document())
}

fn ready_model(width: u16, height: u16) -> Model {
    update(create_test_model(), Message::Resize(width, height))
}

/// Upper-cases slides and records every width it was asked to render at.
#[derive(Clone, Default)]
struct RecordingRenderer {
    widths: Rc<RefCell<Vec<u16>>>,
}

impl SlideRenderer for RecordingRenderer {
    fn render(&self, markdown: &str, width: u16) -> Result<RenderedSlide, RenderError> {
        self.widths.borrow_mut().push(width);
        Ok(RenderedSlide::raw(&format!("{}\n\n", markdown.to_uppercase())))
    }
}

/// Fails on slides mentioning "Two".
struct PickyRenderer;

impl SlideRenderer for PickyRenderer {
    fn render(&self, markdown: &str, _width: u16) -> Result<RenderedSlide, RenderError> {
        if markdown.contains("Two") {
            Err(RenderError::Highlight("unsupported".to_string()))
        } else {
            Ok(RenderedSlide::raw(&markdown.to_uppercase()))
        }
    }
}

fn model_with(renderer: impl SlideRenderer + 'static) -> Model {
    create_test_model().with_renderer(Some(Box::new(renderer)))
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn draw(model: &Model, width: u16, height: u16) -> Buffer {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| crate::ui::render(model, frame))
        .unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

#[test]
fn test_new_model_starts_at_first_slide_not_ready() {
    let model = create_test_model();
    assert_eq!(model.current(), 0);
    assert_eq!(model.slide_count(), 4);
    assert_eq!(model.document().metadata().title, "Quarterly Review");
    assert!(!model.is_ready());
    assert_eq!(model.cache_width(), None);
    assert!(model.rendered_slide().is_none());
}

#[test]
fn test_next_slide_advances_and_stops_at_end() {
    let mut model = create_test_model();
    for expected in [1, 2, 3, 3] {
        model = update(model, Message::NextSlide);
        assert_eq!(model.current(), expected);
    }
}

#[test]
fn test_prev_slide_stops_at_start() {
    let model = update(create_test_model(), Message::LastSlide);
    let model = update(model, Message::PrevSlide);
    assert_eq!(model.current(), 2);

    let model = update(update(update(model, Message::PrevSlide), Message::PrevSlide), Message::PrevSlide);
    assert_eq!(model.current(), 0);
}

#[test]
fn test_first_and_last_are_idempotent() {
    let model = update(create_test_model(), Message::LastSlide);
    let model = update(model, Message::LastSlide);
    assert_eq!(model.current(), 3);

    let model = update(model, Message::FirstSlide);
    let model = update(model, Message::FirstSlide);
    assert_eq!(model.current(), 0);
}

#[test]
fn test_navigation_on_single_slide_deck_stays_put() {
    let doc = Document::parse(b"# Solo\n").unwrap();
    let mut model = Model::new(doc);
    for msg in [
        Message::NextSlide,
        Message::PrevSlide,
        Message::LastSlide,
        Message::FirstSlide,
    ] {
        model = update(model, msg);
        assert_eq!(model.current(), 0);
    }
}

#[test]
fn test_quit_sets_flag_and_keeps_position() {
    let model = update(create_test_model(), Message::NextSlide);
    let model = update(model, Message::Quit);
    assert!(model.should_quit);
    assert_eq!(model.current(), 1);
}

#[test]
fn test_resize_makes_model_ready() {
    let model = ready_model(80, 24);
    assert!(model.is_ready());
    assert_eq!(model.cache_width(), Some(80));
    assert_eq!((model.width, model.height), (80, 24));
    assert!(model.rendered_slide().is_some());
}

#[test]
fn test_without_renderer_slides_are_raw() {
    let model = ready_model(80, 24);
    assert_eq!(
        model.rendered_slide().unwrap().to_plain_string(),
        "# Quarterly Review\n\n*Sam*"
    );
}

#[test]
fn test_cache_rebuilt_only_when_width_changes() {
    let renderer = RecordingRenderer::default();
    let widths = Rc::clone(&renderer.widths);
    let model = model_with(renderer);

    let model = update(model, Message::Resize(80, 24));
    assert_eq!(widths.borrow().len(), 4);

    // Height-only change keeps the cache.
    let model = update(model, Message::Resize(80, 40));
    assert_eq!(widths.borrow().len(), 4);
    assert_eq!(model.height, 40);

    // Navigation never renders.
    let model = update(update(model, Message::NextSlide), Message::LastSlide);
    assert_eq!(widths.borrow().len(), 4);

    let model = update(model, Message::Resize(100, 40));
    assert_eq!(widths.borrow().len(), 8);
    assert_eq!(model.cache_width(), Some(100));
}

#[test]
fn test_content_width_reserves_margins_with_floor() {
    let renderer = RecordingRenderer::default();
    let widths = Rc::clone(&renderer.widths);
    let model = update(model_with(renderer), Message::Resize(80, 24));
    assert!(widths.borrow().iter().all(|w| *w == 72));

    let _model = update(model, Message::Resize(10, 24));
    assert!(widths.borrow()[4..].iter().all(|w| *w == 20));
}

#[test]
fn test_rendered_slides_have_no_trailing_blank_lines() {
    let model = update(model_with(RecordingRenderer::default()), Message::Resize(80, 24));
    let slide = model.rendered_slide().unwrap();
    assert_eq!(slide.to_plain_string(), "# QUARTERLY REVIEW\n\n*SAM*");
}

#[test]
fn test_failing_slide_falls_back_to_raw_content() {
    let model = update(model_with(PickyRenderer), Message::Resize(80, 24));
    let model = update(model, Message::NextSlide);
    assert_eq!(model.rendered_slide().unwrap().to_plain_string(), "# ONE");

    let model = update(model, Message::NextSlide);
    assert_eq!(model.rendered_slide().unwrap().to_plain_string(), "# Two");

    let model = update(model, Message::NextSlide);
    assert_eq!(model.rendered_slide().unwrap().to_plain_string(), "# THREE");
}

#[test]
fn test_with_renderer_none_renders_raw() {
    let model = create_test_model().with_renderer(None);
    let model = update(model, Message::Resize(80, 24));
    let model = update(model, Message::LastSlide);
    assert_eq!(model.rendered_slide().unwrap().to_plain_string(), "# Three");
}

#[test]
fn test_status_line_shows_title_and_counter() {
    let model = update(ready_model(40, 10), Message::NextSlide);
    let status = model.status_line();
    assert!(status.starts_with(" Quarterly Review"));
    assert!(status.ends_with(" 2 / 4 "));
    assert_eq!(status.chars().count(), 40);
}

#[test]
fn test_status_line_for_untitled_deck() {
    let doc = Document::parse(b"# A\n\n---\n\n# B\n").unwrap();
    let model = update(Model::new(doc), Message::Resize(30, 10));
    assert!(model.status_line().starts_with(" Presentation"));
    assert!(model.status_line().ends_with(" 1 / 2 "));
}

#[test]
fn test_view_shows_loading_before_first_resize() {
    let buffer = draw(&create_test_model(), 40, 10);
    assert!(row_text(&buffer, 0).starts_with("Loading..."));
}

#[test]
fn test_view_places_status_bar_on_last_row() {
    let model = ready_model(40, 10);
    let buffer = draw(&model, 40, 10);
    assert_eq!(row_text(&buffer, 9), model.status_line());
}

#[test]
fn test_view_pads_slide_body() {
    let model = ready_model(40, 10);
    let buffer = draw(&model, 40, 10);
    assert!(row_text(&buffer, 0).trim().is_empty());
    assert!(row_text(&buffer, 1).trim().is_empty());
    assert!(row_text(&buffer, 2).starts_with("    # Quarterly Review"));
}

#[test]
fn test_view_out_of_range_slide_renders_empty_body() {
    let mut model = ready_model(40, 10);
    model.set_current(99);
    let buffer = draw(&model, 40, 10);
    for y in 0..9 {
        assert!(row_text(&buffer, y).trim().is_empty());
    }
}

#[test]
fn test_view_survives_tiny_terminal() {
    let model = ready_model(3, 1);
    let buffer = draw(&model, 3, 1);
    assert_eq!(buffer.area.height, 1);
}

#[test]
fn test_next_keys() {
    let app = App::new(create_test_document());
    for code in [
        KeyCode::Right,
        KeyCode::Char('l'),
        KeyCode::Char('n'),
        KeyCode::Char(' '),
        KeyCode::Enter,
    ] {
        assert_eq!(app.handle_key(key(code)), Some(Message::NextSlide), "{code:?}");
    }
}

#[test]
fn test_prev_keys() {
    let app = App::new(create_test_document());
    for code in [
        KeyCode::Left,
        KeyCode::Char('h'),
        KeyCode::Char('p'),
        KeyCode::Backspace,
    ] {
        assert_eq!(app.handle_key(key(code)), Some(Message::PrevSlide), "{code:?}");
    }
}

#[test]
fn test_jump_keys() {
    let app = App::new(create_test_document());
    assert_eq!(app.handle_key(key(KeyCode::Char('g'))), Some(Message::FirstSlide));
    assert_eq!(app.handle_key(key(KeyCode::Home)), Some(Message::FirstSlide));
    assert_eq!(app.handle_key(key(KeyCode::Char('G'))), Some(Message::LastSlide));
    assert_eq!(app.handle_key(key(KeyCode::End)), Some(Message::LastSlide));
}

#[test]
fn test_quit_keys() {
    let app = App::new(create_test_document());
    assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Some(Message::Quit));
    assert_eq!(app.handle_key(key(KeyCode::Esc)), Some(Message::Quit));
    assert_eq!(
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(Message::Quit)
    );
    assert_eq!(app.handle_key(key(KeyCode::Char('c'))), None);
}

#[test]
fn test_unmapped_key_is_ignored() {
    let app = App::new(create_test_document());
    assert_eq!(app.handle_key(key(KeyCode::Char('x'))), None);
}

#[test]
fn test_key_release_is_ignored() {
    let app = App::new(create_test_document());
    let release = KeyEvent::new_with_kind(KeyCode::Right, KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(app.handle_key(release), None);
}

#[test]
fn test_resize_event_is_debounced() {
    let app = App::new(create_test_document());
    let mut debouncer = ResizeDebouncer::new(100);

    assert_eq!(app.handle_event(&Event::Resize(90, 30), 0, &mut debouncer), None);
    assert!(debouncer.is_pending());
    assert_eq!(debouncer.take_ready(50), None);
    assert_eq!(debouncer.take_ready(100), Some((90, 30)));
    assert!(!debouncer.is_pending());
}

#[test]
fn test_resize_debouncer_keeps_latest_size() {
    let mut debouncer = ResizeDebouncer::new(100);
    debouncer.queue(80, 24, 0);
    debouncer.queue(120, 40, 60);
    assert_eq!(debouncer.take_ready(120), None);
    assert_eq!(debouncer.take_ready(160), Some((120, 40)));
}

fn any_message() -> impl Strategy<Value = Message> {
    prop_oneof![
        Just(Message::NextSlide),
        Just(Message::PrevSlide),
        Just(Message::FirstSlide),
        Just(Message::LastSlide),
        (1u16..300, 1u16..100).prop_map(|(w, h)| Message::Resize(w, h)),
    ]
}

proptest! {
    #[test]
    fn prop_current_stays_in_bounds(messages in proptest::collection::vec(any_message(), 0..64)) {
        let mut model = create_test_model();
        for msg in messages {
            model = update(model, msg);
            prop_assert!(model.current() < model.slide_count());
        }
    }

    #[test]
    fn prop_enough_next_reaches_last_slide(extra in 0usize..10) {
        let mut model = create_test_model();
        for _ in 0..model.slide_count() + extra {
            model = update(model, Message::NextSlide);
        }
        prop_assert_eq!(model.current(), model.slide_count() - 1);
    }

    #[test]
    fn prop_cache_matches_slide_count_after_resize(width in 1u16..400) {
        let model = update(create_test_model(), Message::Resize(width, 24));
        prop_assert_eq!(model.cache_width(), Some(width));
        let model = update(model, Message::LastSlide);
        prop_assert!(model.rendered_slide().is_some());
        let model = update(model, Message::FirstSlide);
        prop_assert!(model.rendered_slide().is_some());
    }
}
