//! Processor trait and processor stacks
//!
//! Processors enrich records before handlers see them. They are pure with
//! respect to the record: take one in, hand a new one back. A processor
//! that fails internally must degrade by returning the record unchanged
//! (or with an error marker in `extra`), never abort the log call.

use super::error::{PipelineError, Result};
use super::record::LogRecord;
use std::sync::Arc;

pub trait Processor: Send + Sync {
    fn process(&self, record: LogRecord) -> LogRecord;
}

/// Any `Fn(LogRecord) -> LogRecord` closure is a processor.
impl<F> Processor for F
where
    F: Fn(LogRecord) -> LogRecord + Send + Sync,
{
    fn process(&self, record: LogRecord) -> LogRecord {
        self(record)
    }
}

/// An ordered stack of processors.
///
/// Registration is LIFO: the last processor pushed is the first to run.
#[derive(Clone, Default)]
pub struct ProcessorStack {
    processors: Vec<Arc<dyn Processor>>,
}

impl ProcessorStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, processor: Arc<dyn Processor>) {
        self.processors.push(processor);
    }

    /// Remove and return the most recently pushed processor.
    ///
    /// Popping an empty stack is a programming error and fails with
    /// [`PipelineError::EmptyStack`].
    pub fn pop(&mut self) -> Result<Arc<dyn Processor>> {
        self.processors
            .pop()
            .ok_or(PipelineError::empty_stack("processor"))
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Run the record through every processor, last pushed first.
    pub fn apply(&self, record: LogRecord) -> LogRecord {
        self.processors
            .iter()
            .rev()
            .fold(record, |record, processor| processor.process(record))
    }
}

impl std::fmt::Debug for ProcessorStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorStack")
            .field("len", &self.processors.len())
            .finish()
    }
}
