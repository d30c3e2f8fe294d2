//! Severity level definitions
//!
//! The eight syslog-style levels, totally ordered by numeric value.
//! Name and value conversions are closed: anything outside the known set
//! is a construction error, never a silent default.

use super::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Level {
    #[default]
    Debug = 100,
    Info = 200,
    Notice = 250,
    Warning = 300,
    Error = 400,
    Critical = 500,
    Alert = 550,
    Emergency = 600,
}

impl Level {
    /// All levels in ascending severity order.
    pub const ALL: [Level; 8] = [
        Level::Debug,
        Level::Info,
        Level::Notice,
        Level::Warning,
        Level::Error,
        Level::Critical,
        Level::Alert,
        Level::Emergency,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Notice => "notice",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Critical => "critical",
            Level::Alert => "alert",
            Level::Emergency => "emergency",
        }
    }

    /// Numeric severity value.
    pub fn value(&self) -> u16 {
        *self as u16
    }

    /// Parse a level from its name, case-insensitively.
    ///
    /// Unknown names fail with [`PipelineError::UnknownLevelName`].
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "notice" => Ok(Level::Notice),
            "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            "critical" => Ok(Level::Critical),
            "alert" => Ok(Level::Alert),
            "emergency" => Ok(Level::Emergency),
            _ => Err(PipelineError::UnknownLevelName {
                name: name.to_string(),
            }),
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Debug => BrightBlack,
            Level::Info => Green,
            Level::Notice => Cyan,
            Level::Warning => Yellow,
            Level::Error => Red,
            Level::Critical | Level::Alert | Level::Emergency => BrightRed,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Level {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        Level::from_name(s)
    }
}

impl TryFrom<u16> for Level {
    type Error = PipelineError;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            100 => Ok(Level::Debug),
            200 => Ok(Level::Info),
            250 => Ok(Level::Notice),
            300 => Ok(Level::Warning),
            400 => Ok(Level::Error),
            500 => Ok(Level::Critical),
            550 => Ok(Level::Alert),
            600 => Ok(Level::Emergency),
            _ => Err(PipelineError::UnknownLevelValue { value }),
        }
    }
}
