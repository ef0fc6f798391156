//! Optional diagnostic output injected into the world at construction.

use std::{cell::RefCell, fmt, rc::Rc};

/// Receives human-readable traces of movement resolution.
pub trait DiagnosticSink: fmt::Debug {
    /// Records a single diagnostic line.
    fn record(&mut self, message: &str);
}

/// Sink that forwards diagnostics to the `log` facade at debug level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&mut self, message: &str) {
        log::debug!(target: "chunkwalk::diagnostics", "{message}");
    }
}

/// Sink that keeps every diagnostic in memory.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    messages: Vec<String>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics recorded so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl DiagnosticSink for RecordingSink {
    fn record(&mut self, message: &str) {
        self.messages.push(message.to_owned());
    }
}

/// Sink shared between the world and an observer, for tests and tooling.
#[derive(Clone, Debug, Default)]
pub struct SharedSink {
    inner: Rc<RefCell<RecordingSink>>,
}

impl SharedSink {
    /// Creates an empty shared sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the diagnostics recorded through any clone of this sink.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.inner.borrow().messages().to_vec()
    }
}

impl DiagnosticSink for SharedSink {
    fn record(&mut self, message: &str) {
        self.inner.borrow_mut().record(message);
    }
}
