//! # Rust Log Pipeline
//!
//! A structured logging core: named channels route records through a
//! processor chain and an ordered handler stack, with severity-based
//! dispatch, bubbling, and composable handler behavior (buffering,
//! filtering, fingers-crossed triggering, deduplication, fallback
//! groups).
//!
//! ## Features
//!
//! - **Severity routing**: eight ordered levels with cheap short-circuit
//!   when nothing would accept a record
//! - **Processor chains**: copy-on-write enrichment at channel and
//!   handler scope
//! - **Composable handlers**: wrap leaf destinations with buffering,
//!   filtering, deferred triggering, deduplication, fan-out, or fallback
//! - **Pluggable formatters**: line and JSON included, custom wire
//!   formats behind one trait

pub mod core;
pub mod formatters;
pub mod handlers;
pub mod macros;
pub mod processors;

// Re-exported for the `context!` macro.
pub use serde_json;

pub mod prelude {
    pub use crate::core::{
        Context, Formatter, Handler, Level, LogRecord, Logger, PipelineError, Processor,
        ProcessorStack, Registry, Result,
    };
    pub use crate::formatters::{JsonFormatter, LineFormatter};
    #[cfg(feature = "console")]
    pub use crate::handlers::ConsoleHandler;
    pub use crate::handlers::{
        BufferHandler, DeduplicationHandler, FallbackGroupHandler, FilterHandler,
        FingersCrossedHandler, GroupHandler, MemoryHandler, NullHandler, WriterHandler,
    };
    pub use crate::processors::{
        HostProcessor, MessageInterpolationProcessor, ProcessIdProcessor, RedactionProcessor,
        TagProcessor, UidProcessor,
    };
}

pub use self::core::{
    Context, Formatter, Handler, Level, LogRecord, Logger, PipelineError, Processor,
    ProcessorStack, Registry, Result,
};
pub use formatters::{JsonFormatter, LineFormatter};
#[cfg(feature = "console")]
pub use handlers::ConsoleHandler;
pub use handlers::{
    BufferHandler, DeduplicationHandler, FallbackGroupHandler, FilterHandler,
    FingersCrossedHandler, GroupHandler, MemoryHandler, NullHandler, WriterHandler,
};
pub use processors::{
    HostProcessor, MessageInterpolationProcessor, ProcessIdProcessor, RedactionProcessor,
    TagProcessor, UidProcessor,
};
