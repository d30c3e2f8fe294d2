//! Hostname enrichment
//!
//! The hostname is resolved once per process on first use and cached.
//! [`reset_hostname_cache`] drops the cache so the next record resolves
//! again; tests use it to isolate themselves.

use crate::core::{LogRecord, Processor};
use parking_lot::RwLock;

static HOSTNAME_CACHE: RwLock<Option<String>> = RwLock::new(None);

fn resolve_hostname() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

fn cached_hostname() -> String {
    if let Some(hostname) = HOSTNAME_CACHE.read().as_ref() {
        return hostname.clone();
    }
    let resolved = resolve_hostname();
    *HOSTNAME_CACHE.write() = Some(resolved.clone());
    resolved
}

/// Drop the process-wide hostname cache.
pub fn reset_hostname_cache() {
    *HOSTNAME_CACHE.write() = None;
}

/// Adds `extra["hostname"]` to every record.
pub struct HostProcessor;

impl Processor for HostProcessor {
    fn process(&self, record: LogRecord) -> LogRecord {
        record.with_extra_value("hostname", cached_hostname())
    }
}
