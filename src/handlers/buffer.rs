//! Buffering decorator
//!
//! Accumulates records and forwards them to the inner handler as one
//! batch, in arrival order. The only way a buffered record is lost is the
//! documented FIFO overflow eviction.

use crate::core::{Handler, Level, LogRecord, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

pub struct BufferHandler {
    inner: Arc<dyn Handler>,
    capacity: usize,
    flush_on_overflow: bool,
    buffer: Mutex<VecDeque<LogRecord>>,
}

impl BufferHandler {
    /// Buffer up to `capacity` records (0 = unbounded); the oldest is
    /// evicted on overflow.
    pub fn new(inner: Arc<dyn Handler>, capacity: usize) -> Self {
        Self {
            inner,
            capacity,
            flush_on_overflow: false,
            buffer: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Flush the whole buffer instead of evicting when capacity is hit.
    #[must_use]
    pub fn flush_on_overflow(mut self, enabled: bool) -> Self {
        self.flush_on_overflow = enabled;
        self
    }

    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    /// Forward everything buffered to the inner handler, in arrival order.
    ///
    /// The buffer is taken atomically: a concurrent observer sees either
    /// the full pre-flush buffer or the empty post-flush one.
    pub fn flush(&self) -> Result<()> {
        let records: Vec<LogRecord> = {
            let mut buffer = self.buffer.lock();
            buffer.drain(..).collect()
        };
        if records.is_empty() {
            return Ok(());
        }
        self.inner.handle_batch(&records)
    }
}

impl Handler for BufferHandler {
    fn is_handling(&self, level: Level) -> bool {
        self.inner.is_handling(level)
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        if !self.inner.is_handling(record.level) {
            return Ok(false);
        }

        {
            let mut buffer = self.buffer.lock();
            if self.capacity == 0 || buffer.len() < self.capacity {
                buffer.push_back(record.clone());
                return Ok(false);
            }
            if !self.flush_on_overflow {
                buffer.pop_front();
                buffer.push_back(record.clone());
                return Ok(false);
            }
        }

        // Capacity hit with flush-on-overflow: drain first, then buffer.
        self.flush()?;
        self.buffer.lock().push_back(record.clone());
        Ok(false)
    }

    fn close(&self) {
        if let Err(e) = self.flush() {
            eprintln!("[PIPELINE ERROR] buffer flush on close failed: {}", e);
        }
        self.inner.close();
    }

    fn reset(&self) {
        self.buffer.lock().clear();
        self.inner.reset();
    }
}

impl Drop for BufferHandler {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[PIPELINE ERROR] buffer flush on drop failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Context;
    use crate::handlers::MemoryHandler;
    use chrono::Utc;

    fn record(message: &str) -> LogRecord {
        LogRecord::new(
            "test",
            Level::Info,
            message,
            Context::new(),
            Utc::now().fixed_offset(),
        )
    }

    #[test]
    fn test_nothing_forwarded_until_flush() {
        let inner = Arc::new(MemoryHandler::new());
        let buffer = BufferHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, 10);

        buffer.handle(&record("a")).unwrap();
        buffer.handle(&record("b")).unwrap();
        assert!(inner.is_empty());

        buffer.flush().unwrap();
        let records = inner.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, "a");
        assert_eq!(records[1].message, "b");
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_fifo_overflow_evicts_oldest() {
        let inner = Arc::new(MemoryHandler::new());
        let buffer = BufferHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, 2);

        buffer.handle(&record("a")).unwrap();
        buffer.handle(&record("b")).unwrap();
        buffer.handle(&record("c")).unwrap();

        buffer.flush().unwrap();
        let records = inner.records();
        let messages: Vec<&str> = records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["b", "c"]);
    }

    #[test]
    fn test_flush_on_overflow_keeps_everything() {
        let inner = Arc::new(MemoryHandler::new());
        let buffer =
            BufferHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, 2).flush_on_overflow(true);

        buffer.handle(&record("a")).unwrap();
        buffer.handle(&record("b")).unwrap();
        buffer.handle(&record("c")).unwrap();

        // a and b were flushed by the overflow; c is still buffered.
        assert_eq!(inner.len(), 2);
        assert_eq!(buffer.len(), 1);

        buffer.flush().unwrap();
        assert_eq!(inner.len(), 3);
    }

    #[test]
    fn test_close_flushes_remaining() {
        let inner = Arc::new(MemoryHandler::new());
        let buffer = BufferHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, 10);

        buffer.handle(&record("pending")).unwrap();
        buffer.close();

        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn test_level_gate_delegates_to_inner() {
        let inner = Arc::new(MemoryHandler::with_level(Level::Error));
        let buffer = BufferHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, 10);

        assert!(!buffer.is_handling(Level::Info));
        buffer.handle(&record("skipped")).unwrap();
        assert!(buffer.is_empty());
    }
}
