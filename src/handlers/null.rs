//! Discarding handler

use crate::core::{Handler, Level, LogRecord, Result};

/// Accepts records at or above its level and discards them, stopping the
/// bubbling. Useful to swallow a severity band or as a benchmark sink.
pub struct NullHandler {
    level: Level,
}

impl NullHandler {
    pub fn new() -> Self {
        Self::with_level(Level::Debug)
    }

    pub fn with_level(level: Level) -> Self {
        Self { level }
    }
}

impl Default for NullHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for NullHandler {
    fn is_handling(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        Ok(self.is_handling(record.level))
    }
}
