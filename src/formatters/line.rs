//! Single-line text formatter

use crate::core::{Formatter, LogRecord, Result};
use serde_json::Value;

/// Renders records as `[datetime] channel.LEVEL: message {context} {extra}`.
///
/// Context and extra are appended as compact JSON and omitted entirely
/// when empty.
pub struct LineFormatter {
    date_format: String,
}

impl LineFormatter {
    pub fn new() -> Self {
        Self {
            date_format: "%Y-%m-%dT%H:%M:%S%.6f%:z".to_string(),
        }
    }

    /// Use a custom strftime-compatible date format.
    #[must_use]
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for LineFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        let mut line = format!(
            "[{}] {}.{}: {}",
            record.datetime.format(&self.date_format),
            record.channel,
            record.level.name().to_uppercase(),
            record.message
        );

        if !record.context.is_empty() {
            line.push(' ');
            line.push_str(&Value::Object(record.context.clone()).to_string());
        }
        if !record.extra.is_empty() {
            line.push(' ');
            line.push_str(&Value::Object(record.extra.clone()).to_string());
        }

        Ok(line)
    }
}
