//! Writer-backed handler
//!
//! Formats records and writes one line per record to any caller-supplied
//! `io::Write`. Opening, rotating, and closing the underlying destination
//! is the caller's business; this handler only formats and writes.

use crate::core::{Formatter, Handler, Level, LogRecord, Processor, ProcessorStack, Result};
use crate::formatters::LineFormatter;
use parking_lot::{Mutex, RwLock};
use std::io::Write;
use std::sync::Arc;

pub struct WriterHandler {
    level: Level,
    bubble: bool,
    formatter: Arc<dyn Formatter>,
    processors: RwLock<ProcessorStack>,
    // None once closed
    writer: Mutex<Option<Box<dyn Write + Send>>>,
}

impl WriterHandler {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            level: Level::Debug,
            bubble: true,
            formatter: Arc::new(LineFormatter::new()),
            processors: RwLock::new(ProcessorStack::new()),
            writer: Mutex::new(Some(Box::new(writer))),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_bubble(mut self, bubble: bool) -> Self {
        self.bubble = bubble;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn push_processor(&self, processor: Arc<dyn Processor>) {
        self.processors.write().push(processor);
    }

    pub fn pop_processor(&self) -> Result<Arc<dyn Processor>> {
        self.processors.write().pop()
    }

    pub fn flush(&self) -> Result<()> {
        if let Some(writer) = self.writer.lock().as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Handler for WriterHandler {
    fn is_handling(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        if !self.is_handling(record.level) {
            return Ok(false);
        }

        let record = self.processors.read().apply(record.clone());
        let formatted = self.formatter.format(&record)?;
        let record = record.with_formatted(formatted);

        let mut writer = self.writer.lock();
        if let Some(writer) = writer.as_mut() {
            writeln!(writer, "{}", record.formatted.as_deref().unwrap_or_default())?;
        }
        Ok(!self.bubble)
    }

    fn close(&self) {
        // Idempotent: the writer is taken on the first call.
        if let Some(mut writer) = self.writer.lock().take() {
            if let Err(e) = writer.flush() {
                eprintln!("[PIPELINE ERROR] flush on close failed: {}", e);
            }
        }
    }
}
