//! Log record structure
//!
//! A record is logically immutable once it leaves the logger boundary:
//! processors and handlers receive a record and produce a new one via the
//! `with_*` builders rather than mutating shared state in place. The same
//! record may be offered to several handlers, each of which derives its own
//! private copy for its local processor chain.

use super::level::Level;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered key-value data attached to a record.
///
/// Insertion order is preserved (serde_json's `preserve_order` feature) so
/// formatted output stays deterministic.
pub type Context = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub channel: String,
    pub level: Level,
    pub message: String,
    pub context: Context,
    /// Processor-contributed metadata, merged additively.
    pub extra: Context,
    pub datetime: DateTime<FixedOffset>,
    /// Cached serialized form, set by a handler after formatting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
}

impl LogRecord {
    /// Sanitize a message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a crafted message cannot fabricate additional log lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(
        channel: impl Into<String>,
        level: Level,
        message: impl Into<String>,
        context: Context,
        datetime: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            channel: channel.into(),
            level,
            message: Self::sanitize_message(&message.into()),
            context,
            extra: Context::new(),
            datetime,
            formatted: None,
        }
    }

    /// Replace the message, returning a new record.
    ///
    /// The replacement is sanitized the same way as at construction.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Self::sanitize_message(&message.into());
        self
    }

    /// Add or replace a context entry, returning a new record.
    #[must_use]
    pub fn with_context_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Add or replace an extra entry, returning a new record.
    #[must_use]
    pub fn with_extra_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Attach a cached serialized form, returning a new record.
    #[must_use]
    pub fn with_formatted(mut self, formatted: impl Into<String>) -> Self {
        self.formatted = Some(formatted.into());
        self
    }
}
