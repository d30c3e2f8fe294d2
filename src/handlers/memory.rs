//! In-memory collecting handler
//!
//! Keeps every accepted record in a vector for later inspection. The
//! primary test double for the dispatch engine, and occasionally useful
//! as a bounded in-process sink.

use crate::core::{Handler, Level, LogRecord, Processor, ProcessorStack, Result};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

pub struct MemoryHandler {
    level: Level,
    bubble: bool,
    processors: RwLock<ProcessorStack>,
    records: Mutex<Vec<LogRecord>>,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::with_level(Level::Debug)
    }

    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            bubble: true,
            processors: RwLock::new(ProcessorStack::new()),
            records: Mutex::new(Vec::new()),
        }
    }

    /// With `bubble` false, `handle` reports the record as fully handled
    /// and stops dispatch at this handler.
    #[must_use]
    pub fn with_bubble(mut self, bubble: bool) -> Self {
        self.bubble = bubble;
        self
    }

    /// Push a handler-level processor; applied to a private copy of each
    /// record, so siblings in the same logger never see its changes.
    pub fn push_processor(&self, processor: Arc<dyn Processor>) {
        self.processors.write().push(processor);
    }

    pub fn pop_processor(&self) -> Result<Arc<dyn Processor>> {
        self.processors.write().pop()
    }

    /// Snapshot of the collected records, in arrival order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// Whether any collected record's message contains `needle`.
    pub fn has_message_containing(&self, needle: &str) -> bool {
        self.records
            .lock()
            .iter()
            .any(|record| record.message.contains(needle))
    }
}

impl Default for MemoryHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for MemoryHandler {
    fn is_handling(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        if !self.is_handling(record.level) {
            return Ok(false);
        }

        let record = self.processors.read().apply(record.clone());
        self.records.lock().push(record);
        Ok(!self.bubble)
    }

    fn reset(&self) {
        self.clear();
    }
}
