//! Channel logger and dispatch engine
//!
//! A [`Logger`] owns an ordered stack of handlers and an ordered stack of
//! processors, both LIFO: the last pushed runs first. A `log` call builds
//! one record, runs it through the channel processors, then offers it to
//! each handler from most-recently-pushed to least-recently-pushed until
//! one stops the bubbling.
//!
//! A logger with no handlers silently accepts and drops records:
//! `is_handling` reports false and `log` is a no-op returning `Ok(false)`.
//! This is deliberate: applications must not crash because logging is
//! unconfigured.

use super::{
    error::{PipelineError, Result},
    handler::Handler,
    level::Level,
    processor::{Processor, ProcessorStack},
    record::{Context, LogRecord},
};
use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct LoggerInner {
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
    processors: RwLock<ProcessorStack>,
    timezone: RwLock<FixedOffset>,
    microseconds: AtomicBool,
}

/// A named logging channel.
///
/// Cloning is cheap, and [`Logger::with_name`] derives a sub-channel that
/// shares the same handler and processor stacks under a different name.
/// Pushing or popping while other threads are logging is a logical race
/// the caller must exclude; the locks only keep it memory-safe.
#[derive(Clone)]
pub struct Logger {
    name: String,
    inner: Arc<LoggerInner>,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Arc::new(LoggerInner {
                handlers: RwLock::new(Vec::new()),
                processors: RwLock::new(ProcessorStack::new()),
                timezone: RwLock::new(Utc.fix()),
                microseconds: AtomicBool::new(true),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Derive a logger with a different channel name sharing this one's
    /// handler and processor stacks.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: Arc::clone(&self.inner),
        }
    }

    /// Push a handler onto the stack. The last pushed handler is the
    /// first offered each record.
    pub fn push_handler(&self, handler: Arc<dyn Handler>) {
        self.inner.handlers.write().push(handler);
    }

    /// Pop the most recently pushed handler.
    pub fn pop_handler(&self) -> Result<Arc<dyn Handler>> {
        self.inner
            .handlers
            .write()
            .pop()
            .ok_or(PipelineError::empty_stack("handler"))
    }

    /// Push a channel-level processor. The last pushed processor runs
    /// first.
    pub fn push_processor(&self, processor: Arc<dyn Processor>) {
        self.inner.processors.write().push(processor);
    }

    /// Pop the most recently pushed processor.
    pub fn pop_processor(&self) -> Result<Arc<dyn Processor>> {
        self.inner.processors.write().pop()
    }

    /// Set the timezone applied to record timestamps.
    pub fn set_timezone(&self, timezone: FixedOffset) {
        *self.inner.timezone.write() = timezone;
    }

    /// Toggle sub-second timestamp precision. When disabled, timestamps
    /// are truncated to whole seconds.
    pub fn use_microseconds(&self, enabled: bool) {
        self.inner.microseconds.store(enabled, Ordering::Relaxed);
    }

    /// Whether any handler in the stack would accept a record at `level`.
    ///
    /// Cheap and side-effect-free; lets callers skip expensive context
    /// construction when nothing would accept the record.
    pub fn is_handling(&self, level: Level) -> bool {
        self.inner
            .handlers
            .read()
            .iter()
            .any(|handler| handler.is_handling(level))
    }

    /// Create a record and dispatch it through the handler stack.
    ///
    /// Returns `Ok(true)` if some handler stopped the bubbling, `Ok(false)`
    /// if the record bubbled through every handler (or no handler accepted
    /// the level, in which case neither the record nor any processor ran).
    /// Handler errors propagate; wrap handlers in a fallback group to opt
    /// into suppression.
    pub fn log(&self, level: Level, message: impl Into<String>, context: Context) -> Result<bool> {
        let handlers = self.inner.handlers.read();
        if !handlers.iter().any(|handler| handler.is_handling(level)) {
            return Ok(false);
        }

        let record = LogRecord::new(
            self.name.clone(),
            level,
            message,
            context,
            self.current_datetime(),
        );
        let record = self.inner.processors.read().apply(record);

        for handler in handlers.iter().rev() {
            if handler.is_handling(level) && handler.handle(&record)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn current_datetime(&self) -> DateTime<FixedOffset> {
        let timezone = *self.inner.timezone.read();
        let now = Utc::now().with_timezone(&timezone);
        if self.inner.microseconds.load(Ordering::Relaxed) {
            now
        } else {
            now.with_nanosecond(0).unwrap_or(now)
        }
    }

    /// Close every handler in the stack.
    pub fn close(&self) {
        for handler in self.inner.handlers.read().iter() {
            handler.close();
        }
    }

    /// Reset every handler in the stack to its pristine state.
    pub fn reset(&self) {
        for handler in self.inner.handlers.read().iter() {
            handler.reset();
        }
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> Result<bool> {
        self.log(Level::Debug, message, Context::new())
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> Result<bool> {
        self.log(Level::Info, message, Context::new())
    }

    #[inline]
    pub fn notice(&self, message: impl Into<String>) -> Result<bool> {
        self.log(Level::Notice, message, Context::new())
    }

    #[inline]
    pub fn warning(&self, message: impl Into<String>) -> Result<bool> {
        self.log(Level::Warning, message, Context::new())
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<bool> {
        self.log(Level::Error, message, Context::new())
    }

    #[inline]
    pub fn critical(&self, message: impl Into<String>) -> Result<bool> {
        self.log(Level::Critical, message, Context::new())
    }

    #[inline]
    pub fn alert(&self, message: impl Into<String>) -> Result<bool> {
        self.log(Level::Alert, message, Context::new())
    }

    #[inline]
    pub fn emergency(&self, message: impl Into<String>) -> Result<bool> {
        self.log(Level::Emergency, message, Context::new())
    }

    /// Log with structured context fields
    pub fn debug_with(&self, message: impl Into<String>, context: Context) -> Result<bool> {
        self.log(Level::Debug, message, context)
    }

    pub fn info_with(&self, message: impl Into<String>, context: Context) -> Result<bool> {
        self.log(Level::Info, message, context)
    }

    pub fn notice_with(&self, message: impl Into<String>, context: Context) -> Result<bool> {
        self.log(Level::Notice, message, context)
    }

    pub fn warning_with(&self, message: impl Into<String>, context: Context) -> Result<bool> {
        self.log(Level::Warning, message, context)
    }

    pub fn error_with(&self, message: impl Into<String>, context: Context) -> Result<bool> {
        self.log(Level::Error, message, context)
    }

    pub fn critical_with(&self, message: impl Into<String>, context: Context) -> Result<bool> {
        self.log(Level::Critical, message, context)
    }

    pub fn alert_with(&self, message: impl Into<String>, context: Context) -> Result<bool> {
        self.log(Level::Alert, message, context)
    }

    pub fn emergency_with(&self, message: impl Into<String>, context: Context) -> Result<bool> {
        self.log(Level::Emergency, message, context)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("handlers", &self.inner.handlers.read().len())
            .field("processors", &self.inner.processors.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::MemoryHandler;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_no_handlers_is_silent_noop() {
        let logger = Logger::new("bare");
        assert!(!logger.is_handling(Level::Emergency));
        assert_eq!(logger.error("nobody listens").unwrap(), false);
    }

    #[test]
    fn test_disabled_level_short_circuit() {
        let logger = Logger::new("app");
        let handler = Arc::new(MemoryHandler::with_level(Level::Error));
        logger.push_handler(handler);

        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        logger.push_processor(Arc::new(move |record: LogRecord| {
            seen.fetch_add(1, Ordering::SeqCst);
            record
        }));

        logger.debug("below threshold").unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        logger.error("at threshold").unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_channel_name_lands_on_record() {
        let logger = Logger::new("billing");
        let handler = Arc::new(MemoryHandler::new());
        logger.push_handler(Arc::clone(&handler) as Arc<dyn Handler>);

        logger.info("charged").unwrap();

        let records = handler.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].channel, "billing");
    }

    #[test]
    fn test_with_name_shares_stacks() {
        let logger = Logger::new("app");
        let derived = logger.with_name("app.worker");

        let handler = Arc::new(MemoryHandler::new());
        derived.push_handler(Arc::clone(&handler) as Arc<dyn Handler>);

        // The handler pushed through the derivation serves the original too.
        logger.info("visible to both").unwrap();
        derived.info("tagged with the derived name").unwrap();

        let records = handler.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].channel, "app");
        assert_eq!(records[1].channel, "app.worker");
    }

    #[test]
    fn test_pop_empty_stacks_fail() {
        let logger = Logger::new("app");
        assert!(matches!(
            logger.pop_handler().err().unwrap(),
            PipelineError::EmptyStack { stack: "handler" }
        ));
        assert!(matches!(
            logger.pop_processor().err().unwrap(),
            PipelineError::EmptyStack { stack: "processor" }
        ));
    }

    #[test]
    fn test_bubbling_stops_at_first_true() {
        let logger = Logger::new("app");
        let bottom = Arc::new(MemoryHandler::new());
        let top = Arc::new(MemoryHandler::new().with_bubble(false));

        logger.push_handler(Arc::clone(&bottom) as Arc<dyn Handler>);
        logger.push_handler(Arc::clone(&top) as Arc<dyn Handler>);

        assert_eq!(logger.info("stops at the top").unwrap(), true);
        assert_eq!(top.records().len(), 1);
        assert!(bottom.records().is_empty());
    }

    #[test]
    fn test_bubbling_continues_past_false() {
        let logger = Logger::new("app");
        let bottom = Arc::new(MemoryHandler::new());
        let top = Arc::new(MemoryHandler::new());

        logger.push_handler(Arc::clone(&bottom) as Arc<dyn Handler>);
        logger.push_handler(Arc::clone(&top) as Arc<dyn Handler>);

        assert_eq!(logger.info("reaches both").unwrap(), false);
        assert_eq!(top.records().len(), 1);
        assert_eq!(bottom.records().len(), 1);
    }

    #[test]
    fn test_microsecond_truncation() {
        let logger = Logger::new("app");
        let handler = Arc::new(MemoryHandler::new());
        logger.push_handler(Arc::clone(&handler) as Arc<dyn Handler>);
        logger.use_microseconds(false);

        logger.info("whole seconds").unwrap();

        let records = handler.records();
        assert_eq!(records[0].datetime.nanosecond(), 0);
    }

    #[test]
    fn test_timezone_applies_to_records() {
        let logger = Logger::new("app");
        let handler = Arc::new(MemoryHandler::new());
        logger.push_handler(Arc::clone(&handler) as Arc<dyn Handler>);
        logger.set_timezone(FixedOffset::east_opt(2 * 3600).unwrap());

        logger.info("offset").unwrap();

        let records = handler.records();
        assert_eq!(records[0].datetime.offset().local_minus_utc(), 2 * 3600);
    }
}
