//! Formatter trait for record serialization
//!
//! A formatter turns records into a destination wire format. It never
//! mutates the input record and must cope with empty context/extra maps.

use super::error::Result;
use super::record::LogRecord;

pub trait Formatter: Send + Sync {
    /// Serialize one record.
    fn format(&self, record: &LogRecord) -> Result<String>;

    /// Serialize a batch, preserving input order.
    fn format_batch(&self, records: &[LogRecord]) -> Result<String> {
        let lines = records
            .iter()
            .map(|record| self.format(record))
            .collect::<Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }
}
