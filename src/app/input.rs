use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::app::{App, Message, Model};

use super::event_loop::ResizeDebouncer;

impl App {
    pub(super) fn handle_event(
        &self,
        event: &Event,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => self.handle_key(*key),
            Event::Resize(width, height) => {
                tracing::trace!(width, height, "resize queued");
                resize_debouncer.queue(*width, *height, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(&self, key: KeyEvent) -> Option<Message> {
        // Terminals with key release reporting would otherwise move twice.
        if key.kind == KeyEventKind::Release {
            return None;
        }

        match key.code {
            KeyCode::Right
            | KeyCode::Char('l' | 'n' | ' ')
            | KeyCode::Enter => Some(Message::NextSlide),
            KeyCode::Left | KeyCode::Char('h' | 'p') | KeyCode::Backspace => {
                Some(Message::PrevSlide)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::FirstSlide),
            KeyCode::Char('G') | KeyCode::End => Some(Message::LastSlide),

            // Quit
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Message::Quit),

            _ => None,
        }
    }

    pub(super) fn view(&self, model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
