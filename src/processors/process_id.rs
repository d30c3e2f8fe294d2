//! Process-id enrichment

use crate::core::{LogRecord, Processor};

/// Adds `extra["process_id"]` to every record.
pub struct ProcessIdProcessor;

impl Processor for ProcessIdProcessor {
    fn process(&self, record: LogRecord) -> LogRecord {
        record.with_extra_value("process_id", std::process::id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Context, Level};
    use chrono::Utc;

    #[test]
    fn test_adds_process_id() {
        let record = LogRecord::new(
            "test",
            Level::Info,
            "m",
            Context::new(),
            Utc::now().fixed_offset(),
        );

        let out = ProcessIdProcessor.process(record);
        assert_eq!(out.extra["process_id"], std::process::id());
    }
}
