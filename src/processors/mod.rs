//! Processor implementations
//!
//! Processors enrich or transform records before handlers format them.
//! Push them on a logger for channel-wide enrichment or on a leaf handler
//! for destination-specific shaping.

pub mod host;
pub mod interpolate;
pub mod process_id;
pub mod redact;
pub mod tag;
pub mod uid;

pub use host::{reset_hostname_cache, HostProcessor};
pub use interpolate::MessageInterpolationProcessor;
pub use process_id::ProcessIdProcessor;
pub use redact::RedactionProcessor;
pub use tag::TagProcessor;
pub use uid::UidProcessor;
