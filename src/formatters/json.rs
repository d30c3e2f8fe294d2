//! JSON formatter

use crate::core::{Formatter, LogRecord, Result};
use serde_json::{Map, Value};

/// Serializes each record as one JSON object; batches come out
/// newline-delimited in input order.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Pretty-print single records. Batches stay compact so the
    /// one-object-per-line shape holds.
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn build_object(record: &LogRecord) -> Map<String, Value> {
        let mut object = Map::new();
        object.insert("message".to_string(), Value::String(record.message.clone()));
        object.insert(
            "context".to_string(),
            Value::Object(record.context.clone()),
        );
        object.insert(
            "level".to_string(),
            Value::String(record.level.name().to_string()),
        );
        object.insert(
            "level_value".to_string(),
            Value::Number(record.level.value().into()),
        );
        object.insert("channel".to_string(), Value::String(record.channel.clone()));
        object.insert(
            "datetime".to_string(),
            Value::String(record.datetime.to_rfc3339()),
        );
        object.insert("extra".to_string(), Value::Object(record.extra.clone()));
        object
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        let object = Value::Object(Self::build_object(record));
        let out = if self.pretty {
            serde_json::to_string_pretty(&object)?
        } else {
            serde_json::to_string(&object)?
        };
        Ok(out)
    }

    fn format_batch(&self, records: &[LogRecord]) -> Result<String> {
        let lines = records
            .iter()
            .map(|record| serde_json::to_string(&Value::Object(Self::build_object(record))))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }
}
