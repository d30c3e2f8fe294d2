//! Fallback group handler
//!
//! Tolerates a flaky destination: candidates are tried in order and the
//! first whose `handle` completes without error wins. Only when every
//! candidate fails does the group itself fail, carrying the last error.

use crate::core::{Handler, Level, LogRecord, PipelineError, Result};
use std::sync::Arc;

pub struct FallbackGroupHandler {
    handlers: Vec<Arc<dyn Handler>>,
}

impl FallbackGroupHandler {
    pub fn new(handlers: Vec<Arc<dyn Handler>>) -> Self {
        Self { handlers }
    }
}

impl Handler for FallbackGroupHandler {
    fn is_handling(&self, level: Level) -> bool {
        self.handlers.iter().any(|h| h.is_handling(level))
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        let mut attempts = 0;
        let mut last_error = None;

        for handler in &self.handlers {
            if !handler.is_handling(record.level) {
                continue;
            }
            attempts += 1;
            match handler.handle(record) {
                Ok(stop) => return Ok(stop),
                Err(e) => last_error = Some(e),
            }
        }

        match last_error {
            Some(source) => Err(PipelineError::FallbackExhausted {
                attempts,
                source: Box::new(source),
            }),
            // No candidate accepted the level; nothing was attempted.
            None => Ok(false),
        }
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
