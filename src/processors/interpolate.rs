//! Message placeholder interpolation
//!
//! Replaces `{key}` tokens in the message with stringified values from
//! the record's context. Transforms the message in place, so it is not
//! safely re-appliable: a substituted value containing braces would be
//! scanned again on a second pass.

use crate::core::{LogRecord, Processor};
use regex::Regex;
use serde_json::Value;

pub struct MessageInterpolationProcessor {
    token: Regex,
    remove_used: bool,
}

impl MessageInterpolationProcessor {
    pub fn new() -> Self {
        Self {
            token: Regex::new(r"\{([\w.]+)\}").expect("token pattern is valid"),
            remove_used: false,
        }
    }

    /// Remove context entries that were substituted into the message.
    #[must_use]
    pub fn remove_used_fields(mut self, enabled: bool) -> Self {
        self.remove_used = enabled;
        self
    }

    fn stringify(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            Value::Array(_) | Value::Object(_) => format!("array{}", value),
        }
    }
}

impl Default for MessageInterpolationProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for MessageInterpolationProcessor {
    fn process(&self, record: LogRecord) -> LogRecord {
        if !record.message.contains('{') {
            return record;
        }

        let mut used = Vec::new();
        let message = self
            .token
            .replace_all(&record.message, |caps: &regex::Captures| {
                let key = &caps[1];
                match record.context.get(key) {
                    Some(value) => {
                        used.push(key.to_string());
                        Self::stringify(value)
                    }
                    // Tokens without a context entry stay as-is.
                    None => caps[0].to_string(),
                }
            })
            .into_owned();

        let mut record = record.with_message(message);
        if self.remove_used {
            for key in used {
                record.context.shift_remove(&key);
            }
        }
        record
    }
}
