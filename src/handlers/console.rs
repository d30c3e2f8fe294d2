//! Console handler

use crate::core::{Formatter, Handler, Level, LogRecord, Processor, ProcessorStack, Result};
use colored::Colorize;
use parking_lot::RwLock;
use std::sync::Arc;

/// Writes records to the terminal, routing `Error` and above to stderr.
///
/// Without an explicit formatter it renders a colored single-line text
/// format; with one, the formatter's output is printed as-is.
pub struct ConsoleHandler {
    level: Level,
    bubble: bool,
    use_colors: bool,
    formatter: Option<Arc<dyn Formatter>>,
    processors: RwLock<ProcessorStack>,
}

impl ConsoleHandler {
    pub fn new() -> Self {
        Self {
            level: Level::Debug,
            bubble: true,
            use_colors: true,
            formatter: None,
            processors: RwLock::new(ProcessorStack::new()),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_bubble(mut self, bubble: bool) -> Self {
        self.bubble = bubble;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    pub fn push_processor(&self, processor: Arc<dyn Processor>) {
        self.processors.write().push(processor);
    }

    fn format_text(&self, record: &LogRecord) -> String {
        let level_tag = record.level.name().to_uppercase();
        let level_tag = if self.use_colors {
            level_tag.color(record.level.color_code()).to_string()
        } else {
            level_tag
        };

        let mut line = format!(
            "[{}] {}.{}: {}",
            record.datetime.format("%Y-%m-%dT%H:%M:%S%.6f%:z"),
            record.channel,
            level_tag,
            record.message
        );

        if !record.context.is_empty() {
            line.push(' ');
            line.push_str(&serde_json::Value::Object(record.context.clone()).to_string());
        }
        if !record.extra.is_empty() {
            line.push(' ');
            line.push_str(&serde_json::Value::Object(record.extra.clone()).to_string());
        }
        line
    }
}

impl Default for ConsoleHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for ConsoleHandler {
    fn is_handling(&self, level: Level) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &LogRecord) -> Result<bool> {
        if !self.is_handling(record.level) {
            return Ok(false);
        }

        let record = self.processors.read().apply(record.clone());
        let line = match &self.formatter {
            Some(formatter) => formatter.format(&record)?,
            None => self.format_text(&record),
        };

        if record.level >= Level::Error {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
        Ok(!self.bubble)
    }

    fn close(&self) {
        use std::io::Write;
        let _ = std::io::stdout().flush();
        let _ = std::io::stderr().flush();
    }
}
