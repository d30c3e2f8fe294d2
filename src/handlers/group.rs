//! Fan-out group handler

use crate::core::{Handler, Level, LogRecord, Result};
use std::sync::Arc;

/// Dispatches each record to every wrapped handler that accepts its
/// level. The first handler error aborts the fan-out and propagates.
pub struct GroupHandler {
    handlers: Vec<Arc<dyn Handler>>,
    bubble: bool,
}

impl GroupHandler {
    pub fn new(handlers: Vec<Arc<dyn Handler>>) -> Self {
        Self {
            handlers,
            bubble: true,
        }
    }

    #[must_use]
    pub fn with_bubble(mut self, bubble: bool) -> Self {
        self.bubble = bubble;
        self
    }
}

impl Handler for GroupHandler {
    fn is_handling(&self, level: Level) -> bool {
        self.handlers.iter().any(|h| h.is_handling(level))
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        for handler in &self.handlers {
            if handler.is_handling(record.level) {
                handler.handle(record)?;
            }
        }
        Ok(!self.bubble)
    }

    fn handle_batch(&self, records: &[LogRecord]) -> Result<()> {
        for handler in &self.handlers {
            handler.handle_batch(records)?;
        }
        Ok(())
    }

    fn close(&self) {
        for handler in &self.handlers {
            handler.close();
        }
    }

    fn reset(&self) {
        for handler in &self.handlers {
            handler.reset();
        }
    }
}
