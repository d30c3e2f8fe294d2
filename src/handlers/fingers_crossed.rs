//! Deferred-trigger decorator
//!
//! Withholds low-severity records until a record at the trigger level
//! proves they were relevant, then releases the whole buffer to the inner
//! handler in order. Two states:
//!
//! - **Buffering**: every record is held (FIFO eviction past capacity),
//!   nothing reaches the inner handler.
//! - **Triggered**: entered when any record reaches the trigger level;
//!   the buffer plus the triggering record are forwarded and subsequent
//!   records pass straight through.
//!
//! Only an explicit [`reset`](FingersCrossedHandler::reset) returns the
//! handler to Buffering.

use crate::core::{Handler, Level, LogRecord, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

struct State {
    triggered: bool,
    buffer: VecDeque<LogRecord>,
}

pub struct FingersCrossedHandler {
    inner: Arc<dyn Handler>,
    trigger: Level,
    capacity: usize,
    state: Mutex<State>,
}

impl FingersCrossedHandler {
    /// Buffer up to `capacity` records (0 = unbounded) and trigger at
    /// [`Level::Error`].
    pub fn new(inner: Arc<dyn Handler>, capacity: usize) -> Self {
        Self {
            inner,
            trigger: Level::Error,
            capacity,
            state: Mutex::new(State {
                triggered: false,
                buffer: VecDeque::new(),
            }),
        }
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: Level) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn is_triggered(&self) -> bool {
        self.state.lock().triggered
    }

    pub fn buffered_len(&self) -> usize {
        self.state.lock().buffer.len()
    }
}

impl Handler for FingersCrossedHandler {
    fn is_handling(&self, level: Level) -> bool {
        // While buffering, everything is potential context for a later
        // trigger; once triggered, the inner handler decides.
        if !self.state.lock().triggered {
            true
        } else {
            self.inner.is_handling(level)
        }
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        let released = {
            let mut state = self.state.lock();
            if state.triggered {
                None
            } else {
                state.buffer.push_back(record.clone());
                if record.level >= self.trigger {
                    state.triggered = true;
                    Some(state.buffer.drain(..).collect::<Vec<_>>())
                } else {
                    if self.capacity > 0 && state.buffer.len() > self.capacity {
                        state.buffer.pop_front();
                    }
                    return Ok(false);
                }
            }
        };

        match released {
            // Trigger: the buffer, ending with this record, goes out in order.
            Some(records) => {
                self.inner.handle_batch(&records)?;
                Ok(false)
            }
            // Already triggered: straight pass-through.
            None => self.inner.handle(record),
        }
    }

    fn close(&self) {
        // Untriggered context is discarded; it never proved relevant.
        self.state.lock().buffer.clear();
        self.inner.close();
    }

    fn reset(&self) {
        let mut state = self.state.lock();
        state.triggered = false;
        state.buffer.clear();
        self.inner.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Context;
    use crate::handlers::MemoryHandler;
    use chrono::Utc;

    fn record(level: Level, message: &str) -> LogRecord {
        LogRecord::new(
            "test",
            level,
            message,
            Context::new(),
            Utc::now().fixed_offset(),
        )
    }

    #[test]
    fn test_buffers_until_trigger_then_releases_in_order() {
        let inner = Arc::new(MemoryHandler::new());
        let handler = FingersCrossedHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, 3);

        handler.handle(&record(Level::Info, "one")).unwrap();
        handler.handle(&record(Level::Info, "two")).unwrap();
        handler.handle(&record(Level::Info, "three")).unwrap();
        assert!(inner.is_empty());
        assert!(!handler.is_triggered());

        handler.handle(&record(Level::Error, "boom")).unwrap();
        assert!(handler.is_triggered());

        let records = inner.records();
        let messages: Vec<&str> = records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["one", "two", "three", "boom"]);
    }

    #[test]
    fn test_triggered_state_passes_through() {
        let inner = Arc::new(MemoryHandler::new());
        let handler = FingersCrossedHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, 3);

        handler.handle(&record(Level::Error, "boom")).unwrap();
        handler.handle(&record(Level::Info, "aftermath")).unwrap();

        assert_eq!(inner.len(), 2);
        assert_eq!(handler.buffered_len(), 0);
    }

    #[test]
    fn test_capacity_evicts_oldest_while_buffering() {
        let inner = Arc::new(MemoryHandler::new());
        let handler = FingersCrossedHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, 2);

        handler.handle(&record(Level::Info, "old")).unwrap();
        handler.handle(&record(Level::Info, "mid")).unwrap();
        handler.handle(&record(Level::Info, "new")).unwrap();
        handler.handle(&record(Level::Error, "boom")).unwrap();

        let records = inner.records();
        let messages: Vec<&str> = records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["mid", "new", "boom"]);
    }

    #[test]
    fn test_custom_trigger_level() {
        let inner = Arc::new(MemoryHandler::new());
        let handler = FingersCrossedHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, 0)
            .with_trigger(Level::Warning);

        handler.handle(&record(Level::Info, "calm")).unwrap();
        assert!(!handler.is_triggered());

        handler.handle(&record(Level::Warning, "uh oh")).unwrap();
        assert!(handler.is_triggered());
        assert_eq!(inner.len(), 2);
    }

    #[test]
    fn test_reset_returns_to_buffering() {
        let inner = Arc::new(MemoryHandler::new());
        let handler = FingersCrossedHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, 3);

        handler.handle(&record(Level::Error, "boom")).unwrap();
        assert!(handler.is_triggered());

        handler.reset();
        assert!(!handler.is_triggered());

        handler.handle(&record(Level::Info, "quiet again")).unwrap();
        // Inner was reset too, and the new record is buffered, not forwarded.
        assert!(inner.is_empty());
        assert_eq!(handler.buffered_len(), 1);
    }

    #[test]
    fn test_close_discards_untriggered_buffer() {
        let inner = Arc::new(MemoryHandler::new());
        let handler = FingersCrossedHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, 0);

        handler.handle(&record(Level::Info, "never relevant")).unwrap();
        handler.close();

        assert!(inner.is_empty());
        assert_eq!(handler.buffered_len(), 0);
    }
}
