//! Handler trait for record destinations
//!
//! Handlers are the boundary the dispatch engine drives. Leaf handlers
//! write somewhere; decorating handlers wrap one inner handler and add
//! behavior (buffering, filtering, deduplicating); fan-out handlers wrap
//! several. Handlers shared across threads serialize their own internal
//! state; `handle` is a black-box call that returns the bubbling verdict
//! or an error.

use super::error::Result;
use super::level::Level;
use super::record::LogRecord;

pub trait Handler: Send + Sync {
    /// Whether this handler wants records at the given level.
    ///
    /// Must be cheap and side-effect-free: loggers call it to skip record
    /// construction entirely when nothing would accept the record.
    fn is_handling(&self, level: Level) -> bool;

    /// Handle one record.
    ///
    /// Returns `Ok(true)` when the record is fully handled and bubbling
    /// should stop; `Ok(false)` lets dispatch continue to earlier-pushed
    /// handlers. Errors propagate to the log caller unless a wrapping
    /// handler suppresses them.
    fn handle(&self, record: &LogRecord) -> Result<bool>;

    /// Handle several records, preserving input order.
    fn handle_batch(&self, records: &[LogRecord]) -> Result<()> {
        for record in records {
            self.handle(record)?;
        }
        Ok(())
    }

    /// Flush and release resources. Called at most once per lifecycle end
    /// and must be idempotent.
    fn close(&self) {}

    /// Return internal state to its pristine form (clear buffers, re-arm
    /// triggers). Default is a no-op for stateless handlers.
    fn reset(&self) {}
}
