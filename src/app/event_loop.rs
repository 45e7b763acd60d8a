use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};

/// Resize events closer together than this are applied once.
const RESIZE_DEBOUNCE_MS: u64 = 100;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the presentation until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization fails or the event loop
    /// hits an I/O error. The terminal is restored either way.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let model = Model::new(std::sync::Arc::clone(&self.document))
            .with_theme(self.theme.clone())
            .with_renderer(self.renderer.take());

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal, topdeck requires an interactive terminal")?;
        let result = self.present(&mut terminal, model);
        ratatui::restore();

        result
    }

    fn present(&self, terminal: &mut DefaultTerminal, model: Model) -> Result<()> {
        // The first frame needs a width to render against.
        let size = terminal.size().context("Failed to read terminal size")?;
        tracing::debug!(width = size.width, height = size.height, "initial terminal size");
        let model = update(model, Message::Resize(size.width, size.height));

        self.event_loop(terminal, model)
    }

    fn event_loop(&self, terminal: &mut DefaultTerminal, mut model: Model) -> Result<()> {
        let start = Instant::now();
        let elapsed_ms = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let mut resize_debouncer = ResizeDebouncer::new(RESIZE_DEBOUNCE_MS);
        let mut needs_render = true;

        loop {
            if let Some((width, height)) = resize_debouncer.take_ready(elapsed_ms()) {
                tracing::debug!(width, height, "resize applied");
                model = update(model, Message::Resize(width, height));
                needs_render = true;
            }

            if model.should_quit {
                break;
            }

            if needs_render {
                terminal.draw(|frame| self.view(&model, frame))?;
                needs_render = false;
            }

            let poll_ms = if resize_debouncer.is_pending() { 10 } else { 250 };
            if !event::poll(Duration::from_millis(poll_ms))? {
                continue;
            }

            // Coalesce key repeat bursts into a single render.
            loop {
                let msg = self.handle_event(&event::read()?, elapsed_ms(), &mut resize_debouncer);
                if let Some(msg) = msg {
                    tracing::trace!(?msg, "message");
                    model = update(model, msg);
                    needs_render = true;
                }
                if model.should_quit || !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }
        Ok(())
    }
}
