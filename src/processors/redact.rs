//! Sensitive-data redaction
//!
//! Walks context and extra recursively plus the top-level message. Keys
//! in the sensitive set are masked wholesale; string values matching a
//! pattern have the secret portion of the match replaced. Masking rewrites
//! values, so the processor is not safely re-appliable to its own output.

use crate::core::{Context, LogRecord, Processor};
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashSet;

pub struct RedactionProcessor {
    keys: HashSet<String>,
    patterns: Vec<Regex>,
    mask: String,
}

impl RedactionProcessor {
    /// Build from sensitive key names (matched case-insensitively) and
    /// regex patterns. Invalid patterns are skipped, never fatal.
    pub fn new(keys: &[&str], patterns: &[&str]) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_lowercase()).collect(),
            patterns: patterns
                .iter()
                .filter_map(|p| Regex::new(p).ok())
                .collect(),
            mask: "REDACTED".to_string(),
        }
    }

    #[must_use]
    pub fn with_mask(mut self, mask: impl Into<String>) -> Self {
        self.mask = mask.into();
        self
    }

    /// Replace the secret portion of one pattern match.
    ///
    /// Capture groups mark the secret spans explicitly. For groupless
    /// patterns a `key=secret` / `key:secret` match keeps its prefix
    /// through the first separator; anything else is masked whole.
    fn scrub_match(caps: &Captures, mask: &str) -> String {
        let full = caps.get(0).expect("group 0 always participates");
        let text = full.as_str();

        if caps.len() > 1 {
            let base = full.start();
            let mut out = String::with_capacity(text.len());
            let mut cursor = 0;
            for i in 1..caps.len() {
                if let Some(group) = caps.get(i) {
                    out.push_str(&text[cursor..group.start() - base]);
                    out.push_str(mask);
                    cursor = group.end() - base;
                }
            }
            out.push_str(&text[cursor..]);
            return out;
        }

        match text.find(['=', ':']) {
            Some(pos) => format!("{}{}", &text[..=pos], mask),
            None => mask.to_string(),
        }
    }

    fn scrub_text(&self, text: &str) -> String {
        let mut scrubbed = text.to_string();
        for pattern in &self.patterns {
            scrubbed = pattern
                .replace_all(&scrubbed, |caps: &Captures| {
                    Self::scrub_match(caps, &self.mask)
                })
                .into_owned();
        }
        scrubbed
    }

    fn scrub_value(&self, value: Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.scrub_map(map)),
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| self.scrub_value(v)).collect())
            }
            Value::String(s) => Value::String(self.scrub_text(&s)),
            other => other,
        }
    }

    fn scrub_map(&self, map: Context) -> Context {
        map.into_iter()
            .map(|(key, value)| {
                if self.keys.contains(&key.to_lowercase()) {
                    (key, Value::String(self.mask.clone()))
                } else {
                    (key, self.scrub_value(value))
                }
            })
            .collect()
    }
}

impl Processor for RedactionProcessor {
    fn process(&self, mut record: LogRecord) -> LogRecord {
        record.message = self.scrub_text(&record.message);
        record.context = self.scrub_map(record.context);
        record.extra = self.scrub_map(record.extra);
        record
    }
}
