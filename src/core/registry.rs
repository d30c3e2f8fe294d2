//! Named-logger registry
//!
//! A thin process-wide map from channel names to loggers. The global
//! instance is initialized lazily on first access; `clear` is the
//! teardown hook, primarily for test isolation.

use super::error::{PipelineError, Result};
use super::logger::Logger;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::OnceLock;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

#[derive(Default)]
pub struct Registry {
    loggers: RwLock<HashMap<String, Logger>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, created on first access.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    /// Register a logger, keyed by `name` or by the logger's own channel
    /// name when `name` is `None`.
    ///
    /// Fails with [`PipelineError::DuplicateLogger`] when the name is
    /// taken and `replace` is false.
    pub fn add(&self, logger: Logger, name: Option<&str>, replace: bool) -> Result<()> {
        let key = name.unwrap_or_else(|| logger.name()).to_string();
        let mut loggers = self.loggers.write();
        if !replace && loggers.contains_key(&key) {
            return Err(PipelineError::DuplicateLogger { name: key });
        }
        loggers.insert(key, logger);
        Ok(())
    }

    /// Look up a logger by name.
    pub fn get(&self, name: &str) -> Result<Logger> {
        self.loggers
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| PipelineError::LoggerNotFound {
                name: name.to_string(),
            })
    }

    pub fn has(&self, name: &str) -> bool {
        self.loggers.read().contains_key(name)
    }

    /// Remove one logger. Removing an absent name is a no-op.
    pub fn remove(&self, name: &str) {
        self.loggers.write().remove(name);
    }

    /// Drop every registered logger.
    pub fn clear(&self) {
        self.loggers.write().clear();
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.loggers.read().keys().cloned().collect()
    }
}
