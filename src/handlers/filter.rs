//! Level-filtering decorator

use crate::core::{Handler, Level, LogRecord, Result};
use std::sync::Arc;

enum Accepted {
    Range { min: Level, max: Level },
    Set(Vec<Level>),
}

impl Accepted {
    fn contains(&self, level: Level) -> bool {
        match self {
            Accepted::Range { min, max } => level >= *min && level <= *max,
            Accepted::Set(levels) => levels.contains(&level),
        }
    }
}

/// Wraps one handler and forwards only records inside a level range or an
/// explicit accepted set. Out-of-range records bubble on without the
/// inner handler ever seeing them.
pub struct FilterHandler {
    inner: Arc<dyn Handler>,
    accepted: Accepted,
}

impl FilterHandler {
    /// Accept levels in the inclusive range `min..=max`.
    pub fn new(inner: Arc<dyn Handler>, min: Level, max: Level) -> Self {
        Self {
            inner,
            accepted: Accepted::Range { min, max },
        }
    }

    /// Accept exactly the listed levels.
    pub fn with_levels(inner: Arc<dyn Handler>, levels: &[Level]) -> Self {
        Self {
            inner,
            accepted: Accepted::Set(levels.to_vec()),
        }
    }
}

impl Handler for FilterHandler {
    fn is_handling(&self, level: Level) -> bool {
        self.accepted.contains(level)
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        if !self.accepted.contains(record.level) {
            return Ok(false);
        }
        self.inner.handle(record)
    }

    fn handle_batch(&self, records: &[LogRecord]) -> Result<()> {
        for record in records {
            if self.accepted.contains(record.level) {
                self.inner.handle(record)?;
            }
        }
        Ok(())
    }

    fn close(&self) {
        self.inner.close();
    }

    fn reset(&self) {
        self.inner.reset();
    }
}
