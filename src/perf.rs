//! Lightweight performance instrumentation.
//!
//! Timings are emitted as `tracing` debug events under the `topdeck::perf`
//! target, so they only show up when a log file or `RUST_LOG` asks for them.

use std::time::Instant;

#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Scope {
    /// Milliseconds since the scope was opened.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        tracing::debug!(
            target: "topdeck::perf",
            scope = self.name,
            elapsed_ms = self.elapsed_ms(),
            "scope finished"
        );
    }
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}
