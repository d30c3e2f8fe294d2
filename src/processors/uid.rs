//! Unique-id enrichment
//!
//! Stamps every record with a short random hex id, generated once per
//! processor instance. Pushing one instance per request-scoped channel
//! correlates all of that channel's records; `reset` rolls a fresh id.

use crate::core::{LogRecord, Processor};
use parking_lot::RwLock;
use rand::Rng;

pub struct UidProcessor {
    length: usize,
    uid: RwLock<String>,
}

impl UidProcessor {
    pub fn new() -> Self {
        Self::with_length(7)
    }

    /// Hex id of `length` characters, clamped to 1..=32.
    pub fn with_length(length: usize) -> Self {
        let length = length.clamp(1, 32);
        Self {
            length,
            uid: RwLock::new(Self::generate(length)),
        }
    }

    pub fn uid(&self) -> String {
        self.uid.read().clone()
    }

    /// Roll a new id for subsequent records.
    pub fn reset(&self) {
        *self.uid.write() = Self::generate(self.length);
    }

    fn generate(length: usize) -> String {
        let mut rng = rand::thread_rng();
        let mut uid = String::with_capacity(length);
        while uid.len() < length {
            uid.push_str(&format!("{:02x}", rng.gen::<u8>()));
        }
        uid.truncate(length);
        uid
    }
}

impl Default for UidProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor for UidProcessor {
    fn process(&self, record: LogRecord) -> LogRecord {
        record.with_extra_value("uid", self.uid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Context, Level};
    use chrono::Utc;

    fn record() -> LogRecord {
        LogRecord::new(
            "test",
            Level::Info,
            "m",
            Context::new(),
            Utc::now().fixed_offset(),
        )
    }

    #[test]
    fn test_uid_has_requested_length() {
        for length in [1, 7, 16, 32] {
            let processor = UidProcessor::with_length(length);
            assert_eq!(processor.uid().len(), length);
        }
    }

    #[test]
    fn test_length_is_clamped() {
        assert_eq!(UidProcessor::with_length(0).uid().len(), 1);
        assert_eq!(UidProcessor::with_length(99).uid().len(), 32);
    }

    #[test]
    fn test_uid_is_stable_per_instance() {
        let processor = UidProcessor::new();
        let first = processor.process(record());
        let second = processor.process(record());
        assert_eq!(first.extra["uid"], second.extra["uid"]);
    }

    #[test]
    fn test_reset_rolls_a_new_uid() {
        let processor = UidProcessor::with_length(32);
        let before = processor.uid();
        processor.reset();
        // 128 bits of entropy; a collision here means the generator is broken.
        assert_ne!(before, processor.uid());
    }
}
