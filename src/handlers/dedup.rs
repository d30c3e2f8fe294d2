//! Deduplicating decorator
//!
//! Suppresses records whose (level, message) fingerprint was already seen
//! inside a sliding time window, forwarding only the first occurrence.
//! When a fingerprint drops out of the window having suppressed repeats,
//! one summary record carrying the suppressed count is forwarded.
//!
//! Window arithmetic uses the records' own datetimes, so behavior is
//! deterministic for a given record stream.

use crate::core::{Context, Handler, Level, LogRecord, Result};
use chrono::{DateTime, Duration, FixedOffset};
use parking_lot::Mutex;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

struct SeenEntry {
    channel: String,
    level: Level,
    message: String,
    last_seen: DateTime<FixedOffset>,
    suppressed: u64,
}

impl SeenEntry {
    fn summary(&self) -> LogRecord {
        LogRecord::new(
            &self.channel,
            self.level,
            format!(
                "{} ({} duplicates suppressed)",
                self.message, self.suppressed
            ),
            Context::new(),
            self.last_seen,
        )
        .with_extra_value("suppressed_duplicates", self.suppressed)
    }
}

pub struct DeduplicationHandler {
    inner: Arc<dyn Handler>,
    window: Duration,
    seen: Mutex<HashMap<u64, SeenEntry>>,
}

impl DeduplicationHandler {
    /// Deduplicate within a 60 second window.
    pub fn new(inner: Arc<dyn Handler>) -> Self {
        Self {
            inner,
            window: Duration::seconds(60),
            seen: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn with_window(mut self, window: std::time::Duration) -> Self {
        self.window = Duration::from_std(window).unwrap_or_else(|_| Duration::seconds(i64::MAX / 1_000));
        self
    }

    fn fingerprint(level: Level, message: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        level.value().hash(&mut hasher);
        message.hash(&mut hasher);
        hasher.finish()
    }

    /// Remove entries older than the window, returning summaries for the
    /// ones that suppressed at least one repeat.
    fn collect_expired(
        seen: &mut HashMap<u64, SeenEntry>,
        now: DateTime<FixedOffset>,
        window: Duration,
    ) -> Vec<LogRecord> {
        let expired: Vec<u64> = seen
            .iter()
            .filter(|(_, entry)| now - entry.last_seen > window)
            .map(|(fp, _)| *fp)
            .collect();

        let mut summaries = Vec::new();
        for fp in expired {
            if let Some(entry) = seen.remove(&fp) {
                if entry.suppressed > 0 {
                    summaries.push(entry.summary());
                }
            }
        }
        summaries
    }
}

impl Handler for DeduplicationHandler {
    fn is_handling(&self, level: Level) -> bool {
        self.inner.is_handling(level)
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        if !self.inner.is_handling(record.level) {
            return Ok(false);
        }

        let fp = Self::fingerprint(record.level, &record.message);
        let now = record.datetime;

        let (summaries, suppressed) = {
            let mut seen = self.seen.lock();
            let summaries = Self::collect_expired(&mut seen, now, self.window);

            let suppressed = match seen.get_mut(&fp) {
                Some(entry) => {
                    entry.suppressed += 1;
                    entry.last_seen = now;
                    true
                }
                None => {
                    seen.insert(
                        fp,
                        SeenEntry {
                            channel: record.channel.clone(),
                            level: record.level,
                            message: record.message.clone(),
                            last_seen: now,
                            suppressed: 0,
                        },
                    );
                    false
                }
            };
            (summaries, suppressed)
        };

        // Forward outside the lock; the inner handler is a black box.
        for summary in &summaries {
            self.inner.handle(summary)?;
        }

        if suppressed {
            Ok(false)
        } else {
            self.inner.handle(record)
        }
    }

    fn close(&self) {
        let entries: Vec<SeenEntry> = {
            let mut seen = self.seen.lock();
            seen.drain().map(|(_, entry)| entry).collect()
        };
        for entry in entries {
            if entry.suppressed > 0 {
                if let Err(e) = self.inner.handle(&entry.summary()) {
                    eprintln!("[PIPELINE ERROR] dedup summary on close failed: {}", e);
                }
            }
        }
        self.inner.close();
    }

    fn reset(&self) {
        self.seen.lock().clear();
        self.inner.reset();
    }
}
