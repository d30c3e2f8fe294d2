//! Tag enrichment

use crate::core::{LogRecord, Processor};
use parking_lot::RwLock;
use serde_json::Value;

/// Merges a configured tag list into `extra["tags"]`.
pub struct TagProcessor {
    tags: RwLock<Vec<String>>,
}

impl TagProcessor {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: RwLock::new(tags.into_iter().map(Into::into).collect()),
        }
    }

    pub fn add_tags<I, S>(&self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.write().extend(tags.into_iter().map(Into::into));
    }

    pub fn set_tags<I, S>(&self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.tags.write() = tags.into_iter().map(Into::into).collect();
    }
}

impl Processor for TagProcessor {
    fn process(&self, record: LogRecord) -> LogRecord {
        let tags: Vec<Value> = self
            .tags
            .read()
            .iter()
            .map(|tag| Value::String(tag.clone()))
            .collect();
        record.with_extra_value("tags", Value::Array(tags))
    }
}
