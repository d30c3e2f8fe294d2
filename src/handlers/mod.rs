//! Handler implementations
//!
//! Leaf handlers write records somewhere; the rest wrap other handlers to
//! add buffering, filtering, deferred triggering, deduplication, fan-out,
//! or fallback behavior.

pub mod buffer;
#[cfg(feature = "console")]
pub mod console;
pub mod dedup;
pub mod fallback;
pub mod filter;
pub mod fingers_crossed;
pub mod group;
pub mod memory;
pub mod null;
pub mod writer;

pub use buffer::BufferHandler;
#[cfg(feature = "console")]
pub use console::ConsoleHandler;
pub use dedup::DeduplicationHandler;
pub use fallback::FallbackGroupHandler;
pub use filter::FilterHandler;
pub use fingers_crossed::FingersCrossedHandler;
pub use group::GroupHandler;
pub use memory::MemoryHandler;
pub use null::NullHandler;
pub use writer::WriterHandler;
